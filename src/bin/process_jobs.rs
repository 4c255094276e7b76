//! Background worker executing queued jobs such as opt-in confirmations.

use std::thread;
use std::time::Duration;

use dotenvy::dotenv;

use pushkind_leads::db::establish_connection_pool;
use pushkind_leads::emailer::{ZmqConfirmationSender, ZmqSenderOptions};
use pushkind_leads::models::config::ServerConfig;
use pushkind_leads::repository::DieselRepository;
use pushkind_leads::services::jobs::process_pending_jobs;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    let sender = match ZmqConfirmationSender::start(ZmqSenderOptions::pub_default(
        &server_config.zmq_emailer_pub,
    )) {
        Ok(sender) => sender,
        Err(e) => {
            log::error!("Failed to connect to the emailer: {e}");
            std::process::exit(1);
        }
    };

    let poll_interval = Duration::from_secs(server_config.job_poll_interval_secs);

    log::info!("Starting job worker");

    loop {
        match process_pending_jobs(
            &repo,
            &sender,
            &server_config.site_url,
            server_config.job_batch_size,
        ) {
            Ok(report) if report.processed() > 0 => {
                log::info!(
                    "Processed {} jobs ({} failed)",
                    report.processed(),
                    report.failed
                );
            }
            Ok(_) => {}
            Err(e) => log::error!("Error processing jobs: {e}"),
        }

        thread::sleep(poll_interval);
    }
}
