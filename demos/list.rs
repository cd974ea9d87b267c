//! List the entries of a RAR archive.
//!
//! Usage:
//!   cargo run --example list -- archive.rar

use rar_header::RarFileReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: list <archive.rar>");
        std::process::exit(1);
    }

    let archive = RarFileReader::open_path(&args[1])?;
    println!("RAR{} archive, {} entries:", archive.version(), archive.len());

    for entry in &archive {
        let time = entry
            .file_time()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let method = match entry.compression_info() {
            Some(info) => info.to_string(),
            None => format!("0x{:02x}", entry.method()),
        };
        println!(
            "  {:>12} {:>12} {} {:8} {:>10} {}{}",
            entry.packed_size(),
            entry.unpacked_size(),
            time,
            entry.crc(),
            method,
            entry.name(),
            if entry.is_directory() { "/" } else { "" }
        );
    }

    Ok(())
}
