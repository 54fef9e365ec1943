//! Batch utility that splits a folder of case documents into several fresh
//! review tables carrying a template's column layout. Run once when handing a
//! new batch of cases out to reviewers; the interactive reviewer never calls
//! this.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use case_reviewer::sheets::{document_stems, split_even, write_sheet};
use case_reviewer::store::read_header;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let [folder, template, parts] = args.as_slice() else {
        bail!("usage: make-sheets <documents-folder> <template-csv> <parts>");
    };

    let folder = PathBuf::from(folder);
    let template = PathBuf::from(template);
    let parts: usize = parts
        .parse()
        .context("parts must be a positive number")?;
    if parts == 0 {
        bail!("parts must be at least 1");
    }

    let header = read_header(&template)
        .with_context(|| format!("failed to read template {}", template.display()))?;
    let stems = document_stems(&folder)
        .with_context(|| format!("failed to scan {}", folder.display()))?;
    if stems.is_empty() {
        bail!("no .pdf documents found in {}", folder.display());
    }

    for (index, slice) in split_even(&stems, parts).iter().enumerate() {
        let out = PathBuf::from(format!("output_part_{}.csv", index + 1));
        write_sheet(&header, slice, &out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        println!("Created {} with {} rows.", out.display(), slice.len());
    }
    Ok(())
}
