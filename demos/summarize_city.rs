use forecast_digest::{ForecastDigest, ForecastError, LocationQuery};

// cargo run --example summarize_city -- Paris FR
#[tokio::main]
async fn main() -> Result<(), ForecastError> {
    let mut args = std::env::args().skip(1);
    let city = args.next().unwrap_or_else(|| "Paris".to_string());
    let country = args.next().unwrap_or_else(|| "FR".to_string());
    let key = LocationQuery::new(&city, &country)?.storage_key();

    let digest = ForecastDigest::new()?;
    let summary = digest
        .summarize()
        .location(&city)
        .country(&country)
        .persist(true)
        .call()
        .await?;

    println!("{summary}");
    println!("Saved under {}", digest.store().path_for(&key)?.display());

    Ok(())
}
