use clap::Args;
use storefront_app::{
    database::{self, Db},
    users::{PgUsersService, UsersService, data::NewUser},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unique email address
    #[arg(long)]
    email: String,

    /// Postal address
    #[arg(long, default_value = "")]
    address: String,

    /// `admin` or `client`
    #[arg(long, default_value = "admin")]
    role: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .create_user(NewUser {
            name: args.name,
            email: args.email,
            address: args.address,
            role: args.role,
            registration_date: None,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
