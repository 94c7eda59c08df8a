//! External converter invocation
//!
//! Builds the argument list for a k2pdfopt-compatible reflow converter from
//! a profile and runs it as a child process. The converter itself is a
//! black box; all this module knows is its argument grammar.

use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

use crate::config::{Config, Profile};
use crate::constants::converter;
use crate::margins::{MarginsInches, PageSize, page_range};

/// The binary to invoke: the configured override, or the bare name
/// left to $PATH resolution
pub fn resolve_converter(config: &Config) -> PathBuf {
    config
        .converter_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(converter::DEFAULT_BINARY))
}

/// Default output location: `<stem>_output.<ext>` next to the input
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(converter::OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Full converter argument list for one conversion
pub fn converter_args(
    profile: &Profile,
    page: PageSize,
    page_count: usize,
    input: &Path,
    output: &Path,
) -> Vec<OsString> {
    let margins = MarginsInches::from_profile(profile, page);
    let columns = if profile.many_cols {
        converter::WIDE_COLUMNS
    } else {
        converter::NARROW_COLUMNS
    };

    vec![
        "-x".into(),
        if profile.color { "-c" } else { "-c-" }.into(),
        "-p".into(),
        page_range(profile.skip_first_page, page_count).into(),
        "-col".into(),
        columns.to_string().into(),
        "-ml".into(),
        format!("{:.3}", margins.left).into(),
        "-mr".into(),
        format!("{:.3}", margins.right).into(),
        "-mt".into(),
        format!("{:.3}", margins.top).into(),
        "-mb".into(),
        format!("{:.3}", margins.bottom).into(),
        "-ui-".into(),
        "-o".into(),
        output.as_os_str().into(),
        input.as_os_str().into(),
    ]
}

/// Run the converter on `input`, returning the output path on success
pub fn run(
    config: &Config,
    profile: &Profile,
    page_count: usize,
    input: &Path,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let binary = resolve_converter(config);
    let output = output.unwrap_or_else(|| output_path(input));
    let args = converter_args(profile, PageSize::default(), page_count, input, &output);

    info!(binary = %binary.display(), input = %input.display(), profile = %profile.name, "running converter");
    let status = Command::new(&binary)
        .args(&args)
        .status()
        .with_context(|| format!("failed to launch converter `{}`", binary.display()))?;

    if !status.success() {
        bail!("converter `{}` exited with {}", binary.display(), status);
    }

    info!(output = %output.display(), "conversion finished");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_as_strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_default_profile_args() {
        let profile = Profile::new("p");
        let args = converter_args(
            &profile,
            PageSize::LETTER,
            10,
            Path::new("/docs/paper.pdf"),
            Path::new("/docs/paper_output.pdf"),
        );
        assert_eq!(
            args_as_strings(&args),
            vec![
                "-x", "-c-", "-p", "1-10", "-col", "2", "-ml", "0.000", "-mr", "0.000", "-mt",
                "0.000", "-mb", "0.000", "-ui-", "-o", "/docs/paper_output.pdf",
                "/docs/paper.pdf",
            ]
        );
    }

    #[test]
    fn test_flags_and_margins_in_args() {
        let mut profile = Profile::new("p");
        profile.color = true;
        profile.many_cols = true;
        profile.skip_first_page = true;
        profile.leftmargin = 0.1;
        profile.rightmargin = 0.9;
        profile.topmargin = 0.1;
        profile.bottommargin = 0.9;

        let args = args_as_strings(&converter_args(
            &profile,
            PageSize::LETTER,
            20,
            Path::new("in.pdf"),
            Path::new("out.pdf"),
        ));
        assert!(args.contains(&"-c".to_string()));
        assert!(!args.contains(&"-c-".to_string()));
        assert_eq!(args[args.iter().position(|a| a == "-p").unwrap() + 1], "2-20");
        assert_eq!(args[args.iter().position(|a| a == "-col").unwrap() + 1], "4");
        // Letter page: 0.1 * 8.5 and (1 - 0.9) * 11, three decimals
        assert_eq!(args[args.iter().position(|a| a == "-ml").unwrap() + 1], "0.850");
        assert_eq!(args[args.iter().position(|a| a == "-mb").unwrap() + 1], "1.100");
    }

    #[test]
    fn test_output_path_naming() {
        assert_eq!(
            output_path(Path::new("/docs/paper.pdf")),
            PathBuf::from("/docs/paper_output.pdf")
        );
        assert_eq!(output_path(Path::new("note")), PathBuf::from("note_output"));
    }

    #[test]
    fn test_resolve_converter_override() {
        let mut config = Config::default();
        assert_eq!(resolve_converter(&config), PathBuf::from("k2pdfopt"));

        config.converter_path = Some(PathBuf::from("/opt/k2pdfopt"));
        assert_eq!(resolve_converter(&config), PathBuf::from("/opt/k2pdfopt"));
    }
}
