extern crate actix_web;
extern crate anyhow;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
extern crate itertools;
extern crate log;
extern crate serde;
extern crate serde_json;
extern crate sqlx;
extern crate thiserror;
extern crate tokio;

mod config;
mod core;
mod database;
mod error;
mod handlers;
pub mod response;

use actix_web::web::Data;
use actix_web::HttpServer;
use anyhow::Context;
use config::Config;
use database::sqlx::PgSqlxManager;
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("actix_web=info,quiz_submissions=info")).init();
    let config = Config::from_env().context("failed to load configuration")?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await.context("failed to run migrations")?;
        log::info!("database migrations applied");
    }
    log::info!("listening on {}:{}", config.bind_host, config.bind_port);
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(PgSqlxManager::new(pool.clone())))
            .configure(handlers::routes::<PgSqlxManager>)
    })
    .bind((config.bind_host.as_str(), config.bind_port))?
    .run()
    .await?;
    Ok(())
}
