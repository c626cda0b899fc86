use logplot::{run_logplot, LogPlotConfig};

fn main() -> eframe::Result<()> {
    env_logger::init();
    let cfg = LogPlotConfig::from_env();
    log::info!("starting {}", cfg.title);
    run_logplot(cfg)
}
