use clap::Parser;
use retail::{configuration::Settings, db_interaction::{insert_user_into_database, UserRegistration}, telemetry::{get_subscriber, init_subscriber}, utils::{get_connection_pool, get_pooled_connection, run_migrations}};
use secrecy::SecretString;

/// Creates an account that can obtain tokens from the api
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args{
    #[arg(long)]
    username: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long)]
    password: String,

    #[arg(long)]
    staff: bool,

    #[arg(long)]
    superuser: bool
}

#[tokio::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("create-user".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    let args = Args::parse();
    let settings = Settings::get()?;

    let pool = get_connection_pool(&settings.database);
    let mut conn = get_pooled_connection(&pool).await?;
    run_migrations(&mut conn)?;

    let user = insert_user_into_database(conn, UserRegistration{
        username: args.username,
        email: args.email,
        password: SecretString::from(args.password),
        is_staff: args.staff || args.superuser,
        is_superuser: args.superuser
    })
    .await?;

    println!("Created user {} with id {}", user.username, user.id);
    Ok(())
}
