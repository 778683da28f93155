fn main() {
    println!("cargo::rustc-check-cfg=cfg(wasm)");
    cfg_aliases::cfg_aliases! {
        wasm: { all(target_arch = "wasm32", target_os = "unknown") },
    }
}
