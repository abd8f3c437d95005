use anyhow::Result;
use std::env;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST")?,
            port: env::var("DATABASE_PORT")?.parse()?,
            username: env::var("DATABASE_USERNAME")?,
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME")?,
        };
        let mail = MailConfig {
            endpoint: env::var("MAIL_API_ENDPOINT")?,
            access_token: env::var("MAIL_API_TOKEN")?,
            from_email: env::var("MAIL_FROM_EMAIL")?,
            operator_email: env::var("MAIL_OPERATOR_EMAIL")?,
            app_url: env::var("APP_URL")?,
        };
        Ok(Self { database, mail })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Clone)]
pub struct MailConfig {
    pub endpoint: String,
    pub access_token: String,
    pub from_email: String,
    pub operator_email: String,
    pub app_url: String,
}
