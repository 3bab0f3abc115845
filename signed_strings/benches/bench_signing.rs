use divan::Bencher;
use signed_strings::{Configuration, Key, Keys};

fn main() {
    divan::main();
}

fn ring(n: usize) -> Configuration {
    let mut csprng = rand::rngs::OsRng;
    let keys: Keys = (0..n).map(|_| Key::generate(&mut csprng)).collect();
    Configuration::new(keys).with_prefixes(["TOKEN-"])
}

#[divan::bench(args = [16, 1024, 65536])]
fn sign(bencher: Bencher, payload_len: usize) {
    let conf = ring(1);
    let payload = "x".repeat(payload_len);
    bencher.bench_local(|| conf.sign(divan::black_box(&payload)));
}

// Worst case for validation: the string was signed with the oldest key.
#[divan::bench(args = [1, 4, 16])]
fn validate_oldest_key(bencher: Bencher, ring_size: usize) {
    let conf = ring(ring_size);
    let oldest = Configuration::new(Keys::from(vec![conf.keys().last().clone()]))
        .with_prefixes(["TOKEN-"]);
    let signed = oldest.sign("user:42");
    bencher.bench_local(|| conf.validate(divan::black_box(&signed)));
}

#[divan::bench(args = [1, 4, 16])]
fn validate_forged(bencher: Bencher, ring_size: usize) {
    let conf = ring(ring_size);
    let forged = format!("TOKEN-user:42-{}", "0".repeat(64));
    bencher.bench_local(|| conf.validate(divan::black_box(&forged)));
}
