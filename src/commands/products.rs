//! `revsim products` command - list distinct item ids in catalog order

use revsim_core::catalog::Corpus;
use revsim_core::error::Result;
use revsim_core::records;
use serde::Serialize;

use crate::cli::Cli;
use crate::commands::render::{render, Render};

#[derive(Debug, Serialize)]
struct ProductsOutput<'a> {
    count: usize,
    products: Vec<&'a str>,
}

impl Render for ProductsOutput<'_> {
    fn human(&self, cli: &Cli) {
        if self.products.is_empty() && !cli.quiet {
            println!("No products found");
        }
        for product in &self.products {
            println!("{}", product);
        }
    }

    fn records(&self) {
        println!(
            "{}",
            records::header("products", &[("count", self.count.to_string())])
        );
        for (i, product) in self.products.iter().enumerate() {
            println!("{}", records::product_line(i, product));
        }
    }
}

/// Execute the products command
pub fn execute(cli: &Cli, corpus: &Corpus) -> Result<()> {
    let products = corpus.product_list();
    render(
        cli,
        &ProductsOutput {
            count: products.len(),
            products,
        },
    )
}
