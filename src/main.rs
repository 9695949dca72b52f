use ip_block_router::config::CONFIG_ENV_VAR;
use ip_block_router::output::{print_resolutions, print_resolutions_csv};
use ip_block_router::{init_router, resolve_all};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let mut csv = false;
    let mut addresses = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--csv" => csv = true,
            _ => addresses.push(arg),
        }
    }
    if addresses.is_empty() {
        return Err("usage: ip-block-router [--csv] <ipv4-address>...".into());
    }

    let config_file = std::env::var(CONFIG_ENV_VAR).ok();
    let (service, registry) = init_router(config_file.as_deref())?;
    log::info!("Required providers: {:?}", registry.aliases());

    let results = resolve_all(&service, &addresses);
    if csv {
        print_resolutions_csv(&results);
    } else {
        print_resolutions(&results);
    }

    Ok(())
}
