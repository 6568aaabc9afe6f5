use mktdash::config::Config;
use mktdash::error::Error;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    mktdash::run(config).await
}
