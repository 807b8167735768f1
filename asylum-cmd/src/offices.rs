//! List the embedded asylum office catalog.

use asylum_cases::office::AsylumOffice;
use std::io::{self, Write};

pub fn run_offices() -> anyhow::Result<()> {
    let offices = AsylumOffice::catalog()?;
    let mut out = io::stdout().lock();
    write_offices(&mut out, &offices)?;
    Ok(())
}

/// One `CODE<TAB>Name` line per office.
pub fn write_offices<W: Write>(out: &mut W, offices: &[AsylumOffice]) -> io::Result<()> {
    for office in offices {
        writeln!(out, "{}\t{}", office.code, office.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_catalog_entry() {
        let offices = AsylumOffice::catalog().unwrap();
        let mut out = Vec::new();
        write_offices(&mut out, &offices).unwrap();
        let listing = String::from_utf8(out).unwrap();
        assert_eq!(listing.lines().count(), offices.len());
        assert!(listing.contains("ZNY\tNew York"));
    }
}
