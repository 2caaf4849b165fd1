//====================================================================

use clap::Parser;
use game::config::BattleConfig;

//====================================================================

fn main() {
    let config = BattleConfig::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    if let Err(e) = game::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

//====================================================================
