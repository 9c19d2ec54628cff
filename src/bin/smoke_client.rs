use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use film_ticket_box::utils::logger;
use film_ticket_box::{CinemaClient, CinemaError, CinemaSpec};

#[derive(Parser)]
#[command(name = "smoke_client")]
#[command(about = "Replays the reference booking scenarios against a running server")]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:20322")]
    base_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

fn expect_same(step: &str, actual: Vec<String>, expected: &[&str]) -> Result<()> {
    let expected = sorted(expected.iter().map(|s| s.to_string()).collect());
    let actual = sorted(actual);
    ensure!(
        actual == expected,
        "{}: expected {:?}, got {:?}",
        step,
        expected,
        actual
    );
    println!("  ✅ {}", step);
    Ok(())
}

fn seats(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = CinemaClient::new(&args.base_url).context("invalid --base-url")?;
    println!("🚀 Running smoke scenarios against {}", client.base_url());

    client
        .register_cinemas(&[
            CinemaSpec::new("PiterLand", 2, 3, &["Once upon in hollywood", "Survived"]),
            CinemaSpec::new("Galary", 3, 4, &["Survived", "Ford VS Ferrari"]),
        ])
        .await
        .context("registering PiterLand and Galary")?;
    println!("  ✅ register cinemas");

    match client
        .register_cinemas(&[
            CinemaSpec::new("PiterLand", 10, 20, &["Once upon in hollywood", "Survived"]),
            CinemaSpec::new("Galary", 10, 5, &["Survived", "Ford VS Ferrari"]),
        ])
        .await
    {
        Err(CinemaError::InvalidRequest { message }) if message == "Failed to add cinema" => {
            println!("  ✅ oversized cinemas rejected");
        }
        other => bail!("oversized cinemas: expected rejection, got {:?}", other),
    }

    expect_same(
        "list cinemas",
        client.list_cinemas().await?,
        &["PiterLand", "Galary"],
    )?;
    expect_same(
        "films of Galary",
        client.films_of("Galary").await?,
        &["Survived", "Ford VS Ferrari"],
    )?;
    expect_same(
        "all films",
        client.all_films().await?,
        &["Once upon in hollywood", "Survived", "Ford VS Ferrari"],
    )?;
    expect_same(
        "cinemas showing Survived",
        client.cinemas_showing("Survived").await?,
        &["PiterLand", "Galary"],
    )?;
    expect_same(
        "seats of PiterLand/Survived",
        client.seats("PiterLand", "Survived").await?,
        &["0row0seat", "0row1seat", "0row2seat", "1row0seat", "1row1seat", "1row2seat"],
    )?;

    client
        .book_seats("PiterLand", "Survived", &seats(&["0row0seat", "0row1seat"]))
        .await
        .context("first booking")?;
    println!("  ✅ first booking");

    client
        .book_seats("PiterLand", "Survived", &seats(&["0row2seat", "1row1seat"]))
        .await
        .context("second booking")?;
    println!("  ✅ second booking");

    match client
        .book_seats("PiterLand", "Survived", &seats(&["0row0seat", "1row2seat"]))
        .await
    {
        Err(CinemaError::SeatsBusy { busy_seats }) => {
            expect_same("conflicting booking", busy_seats, &["0row0seat"])?;
        }
        other => bail!("conflicting booking: expected busy seats, got {:?}", other),
    }

    println!("🎉 All scenarios passed");
    Ok(())
}
