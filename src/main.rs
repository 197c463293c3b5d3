use retail::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}, utils::{get_connection_pool, get_pooled_connection, run_migrations}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("retail".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = Settings::get()?;

    let pool = get_connection_pool(&settings.database);
    let mut conn = get_pooled_connection(&pool).await?;
    run_migrations(&mut conn)?;
    drop(conn);

    let application = Application::new(settings).await?;
    tracing::info!("Listening on {}:{}", application.host, application.port);
    application.run_until_stopped().await?;

    Ok(())
}
