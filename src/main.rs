fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    hard_disc_gas::start();
}
