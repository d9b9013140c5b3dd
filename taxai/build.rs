const PRETTY_VAR: &str = "TAXAI_LOG_PRETTY";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed={PRETTY_VAR}");

    let pretty = std::env::var(PRETTY_VAR).is_ok_and(|x| matches!(x.as_str(), "1" | "true"));
    if pretty {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
