//! Print the header and buffer table of a BFAST file

use bfast::Bfast;

fn main() -> bfast::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "example_mesh.bfast".to_string());
    let bfast = Bfast::open(&path)?;

    let header = serde_json::to_string_pretty(bfast.header()).map_err(std::io::Error::other)?;
    println!("{path}\n{header}");

    let names = bfast.names().unwrap_or_default();
    for (i, range) in bfast.ranges().iter().enumerate() {
        let name = names.get(i).copied().unwrap_or("?");
        println!("[{i:>4}] {:>12}..{:<12} {:>10} bytes  {name}", range.begin, range.end, range.len());
    }
    Ok(())
}
