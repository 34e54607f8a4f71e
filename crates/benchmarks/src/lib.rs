//! Benchmark utilities for the Bloom filter family
pub mod utils {
    use rand::Rng;

    /// Random 20-byte keys, shaped like account addresses
    pub fn generate_addresses(count: usize) -> Vec<Vec<u8>> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| {
                let mut addr = vec![0u8; 20];
                rng.fill(&mut addr[..]);
                addr
            })
            .collect()
    }

    /// Keys sharing a 16-byte prefix and differing only in a counter
    pub fn generate_adversarial_addresses(count: usize) -> Vec<Vec<u8>> {
        let mut rng = rand::thread_rng();
        let prefix: [u8; 16] = rng.gen();

        (0..count)
            .map(|i| {
                let mut addr = vec![0u8; 20];
                addr[..16].copy_from_slice(&prefix);
                addr[16..20].copy_from_slice(&(i as u32).to_le_bytes());
                addr
            })
            .collect()
    }
}
