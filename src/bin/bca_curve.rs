//! Fit a BCA standard curve from stdin
//!
//! Reads nine lines of duplicate absorbances (2.0 mg/mL first, blank last)
//! and prints the standards and fit as JSON.

use std::io::Read;

use labzen::tools::protein::fit_bca_standard_curve;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;

    match fit_bca_standard_curve(&raw, None) {
        Ok(resp) => {
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
