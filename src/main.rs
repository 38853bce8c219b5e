// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::Local;
use loja::{MyError, build, config};
use rocket::{fs::relative, launch};
use std::{
    fs::{self, File},
    path::Path,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[launch]
fn rocket() -> _ {
    let file_logger = match log_file() {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_writer(file)
                .with_ansi(false)
                .with_filter(EnvFilter::builder().parse_lossy(&config().rust_log)),
        ),
        Err(x) => {
            eprintln!("Failed opening log file; logging to console only: {}", x);
            None
        }
    };

    let console_logger = tracing_subscriber::fmt::layer().with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(file_logger)
        .with(console_logger)
        .init();

    build(false) // false == not for testing
}

fn log_file() -> Result<File, MyError> {
    let dir = Path::new(relative!("logs"));
    fs::create_dir_all(dir)?;
    let name = format!("loja-{}.log", Local::now().format("%Y%m%d-%H%M%S"));
    let file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(dir.join(name))?;
    Ok(file)
}
