use dsstore_reader::{DsStoreReader, ReaderOptions};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-.DS_Store> [--strict]", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let options = ReaderOptions {
        strict: args.iter().skip(2).any(|arg| arg == "--strict"),
    };

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}", path);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("Reading .DS_Store file: {} ({} bytes)", path, data.len());
    if options.strict {
        println!("Strict mode: format anomalies are fatal.");
    }
    println!("{}", "=".repeat(60));

    match DsStoreReader::new(options).parse(&data) {
        Ok(store) => {
            println!("\nTree Information:");
            println!("  Height: {}", store.tree.height);
            println!("  Records: {}", store.tree.num_records);
            println!("  Nodes: {}", store.tree.num_nodes);

            if !store.warnings.is_empty() {
                println!("\nWarnings:");
                for warning in &store.warnings {
                    println!("  - {}", warning);
                }
            }

            println!("\nFiles ({}):", store.records.len());
            for record in &store.records {
                println!("  {}", record.name);
                for line in record.render_fields() {
                    println!("    {}", line);
                }
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to parse .DS_Store file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
