use clap::Args;
use zeroize::Zeroizing;

use bazaar_app::{
    auth::{Registration, hash_password, normalize_email},
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let registration = Registration {
        name: args.name,
        email: args.email,
        password: Zeroizing::new(args.password),
    };

    registration.check().map_err(str::to_string)?;

    let password_hash = hash_password(&registration.password)
        .map_err(|error| format!("failed to hash password: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(Db::new(pool))
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: registration.name.trim().to_string(),
            email: normalize_email(&registration.email),
            password_hash,
            is_admin: true,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);

    Ok(())
}
