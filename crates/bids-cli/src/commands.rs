use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use bids_validate::datasets::isles24::{ISLES24_ARCHIVE_MD5, verify_isles24_archive};
use bids_validate::{
    DatasetFamily, DatasetValidationConfig, ValidationResult, is_md5_hex, validate_dataset,
    verify_md5,
};

use crate::cli::{ValidateArgs, VerifyArchiveArgs};
use crate::summary::datasets_table;

pub fn run_datasets() -> Result<()> {
    let configs: Vec<_> = DatasetFamily::ALL.iter().map(DatasetFamily::config).collect();
    println!("{}", datasets_table(&configs));
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationResult> {
    let span = info_span!("validate", root = %args.root.display());
    let _guard = span.enter();

    let result = match (&args.config, args.dataset) {
        (Some(path), _) => {
            let mut config = DatasetValidationConfig::load(path)
                .with_context(|| format!("load dataset config {}", path.display()))?;
            override_archive(&mut config, args)?;
            validate_dataset(&args.root, &config)?
        }
        (None, Some(dataset)) => {
            let family = DatasetFamily::from(dataset);
            if args.archive.is_some() {
                let mut config = family.config();
                override_archive(&mut config, args)?;
                family.validate_with(&args.root, &config)?
            } else {
                family.validate(&args.root)?
            }
        }
        (None, None) => bail!("either --dataset or --config is required"),
    };

    info!(
        passed = result.passed_count(),
        failed = result.failed_count(),
        "validation finished"
    );
    Ok(result)
}

pub fn run_verify_archive(args: &VerifyArchiveArgs) -> Result<ValidationResult> {
    let Some(md5) = &args.md5 else {
        info!("Verifying against published ISLES'24 digest {ISLES24_ARCHIVE_MD5}");
        return Ok(verify_isles24_archive(&args.path));
    };
    if !is_md5_hex(md5) {
        bail!("--md5 must be a 32-character hex digest, got '{md5}'");
    }
    let mut result = ValidationResult::new(&args.path);
    result.add(verify_md5(&args.path, md5));
    Ok(result)
}

/// Point the contract's archive check at `--archive`.
fn override_archive(config: &mut DatasetValidationConfig, args: &ValidateArgs) -> Result<()> {
    let Some(path) = &args.archive else {
        return Ok(());
    };
    match config.archive.as_mut() {
        Some(archive) => {
            archive.path = std::path::absolute(path)
                .with_context(|| format!("resolve archive path {}", path.display()))?;
            Ok(())
        }
        None => bail!(
            "dataset '{}' has no archive checksum; --archive cannot be used",
            config.name
        ),
    }
}
