use anyhow::Result;
use envclave::presets::storage_config;
use envclave::{BuildOptions, ConfigRegistry, EnvSnapshot};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let schema = storage_config();

    println!("variables read by the storage feature:");
    for (var, field) in schema.env_keys() {
        println!("  {var} ({:?})", field.kind());
    }

    // Seed a local-provider setup when nothing is configured, so the demo
    // runs without any environment preparation.
    let mut env = EnvSnapshot::capture();
    if env.get("STORAGE_PROVIDER").is_none() {
        env = env
            .with_var("STORAGE_PROVIDER", "local")
            .with_var("STORAGE_BASE_DIR", "/var/lib/storage");
    }

    let mut registry = ConfigRegistry::new();
    let token = registry.register(&schema, &env, &BuildOptions::new())?;
    let config = registry.resolve(&token)?;
    info!("storage config registered (token={token})");

    println!();
    println!("effective storage configuration:");
    for (name, value) in config.fields() {
        println!("  {name} = {value}");
    }

    Ok(())
}
