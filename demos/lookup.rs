use ipapi::Client;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    // empty means "my own address"
    let ip = args.next().unwrap_or_default();
    let api_key = args.next();

    let mut client = Client::new(api_key.as_deref());
    client.set_fields(
        [
            "status", "message", "query", "country", "city", "lat", "lon", "timezone", "isp",
            "as", "proxy", "hosting",
        ],
        true,
    );

    let response = client.query(&CancellationToken::new(), &ip).await?;
    match response.failure_reason() {
        Some(reason) => println!("lookup failed: {reason}"),
        None => println!("{response:#?}"),
    }
    Ok(())
}
