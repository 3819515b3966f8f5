//! Prints the best ranked genes of one or more diseases
//!
//! `cargo run --example rank_genes -- <HGNC FILE> <DISEASE ID> [<DISEASE ID> ...]`
//!
//! The base url of the data source is read from `GENERANK_BASE_URL`.

use std::process;

use generank::{CachedFetcher, Config, DiseaseGeneRanking, GeneDirectory};

const TOP_GENES: usize = 20;

fn main() {
    simple_logger::init_with_level(log::Level::Info).expect("logger can be initialized");

    let mut args = std::env::args().skip(1);
    let Some(hgnc_file) = args.next() else {
        eprintln!("usage: rank_genes <HGNC FILE> <DISEASE ID> [<DISEASE ID> ...]");
        process::exit(1)
    };
    let disease_ids: Vec<String> = args.collect();

    let config = Config::from_env();
    let directory = match GeneDirectory::from_hgnc_file(&hgnc_file) {
        Ok(directory) => directory,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1)
        }
    };
    let fetcher = CachedFetcher::new(&config);

    let ranking = match DiseaseGeneRanking::new(&config, &directory, &fetcher, &disease_ids) {
        Ok(ranking) => ranking,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1)
        }
    };

    for (code, table) in ranking.iter() {
        for (symbol, gene) in table.top(TOP_GENES) {
            println!("{code}\t{symbol}\t{}\t{}", gene.rank(), gene.score());
        }
    }
    for disease_id in ranking.skipped() {
        eprintln!("skipped {disease_id}");
    }
}
