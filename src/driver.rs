use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::config::Config;
use crate::error::Error;
use crate::frequency::FrequencyTable;

/// Counts `config.input`, writes the report to `config.output` and echoes it
/// to `console`. Nothing is created when the input file does not exist.
pub fn run(config: &Config, console: &mut dyn Write) -> Result<FrequencyTable, Error> {
    if let Ok(cwd) = env::current_dir() {
        debug!("current directory: {}", cwd.display());
    }
    debug!("input file: {}", config.input.display());

    if !config.input.is_file() {
        return Err(Error::InputNotFound {
            path: config.input.clone(),
        });
    }

    let (table, read) =
        count_file(&config.input).map_err(|err| Error::from_io(&config.input, err))?;
    info!("{} distinct characters, {} total", table.len(), read);

    write_report(&table, &config.output, console)
        .map_err(|err| Error::from_io(&config.output, err))?;
    info!("report written to {}", config.output.display());

    write_summary(config, console).map_err(|err| Error::from_io("<console>", err))?;
    Ok(table)
}

pub fn count_file(path: &Path) -> io::Result<(FrequencyTable, usize)> {
    let reader = BufReader::new(File::open(path)?);
    let mut table = FrequencyTable::new();
    let read = table.scan(reader)?;
    Ok((table, read))
}

fn write_report(table: &FrequencyTable, path: &Path, console: &mut dyn Write) -> io::Result<()> {
    let mut output = BufWriter::new(File::create(path)?);
    table.write(&mut output, console)
}

fn write_summary(config: &Config, console: &mut dyn Write) -> io::Result<()> {
    writeln!(console)?;
    writeln!(
        console,
        "  * Note: Printed Count.txt file output to Console for Quick Viewing"
    )?;
    writeln!(
        console,
        "  * Args: {}, {}",
        config.input.display(),
        config.output.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config(input: PathBuf, output: PathBuf) -> Config {
        Config { input, output }
    }

    #[test]
    fn test_process_file() {
        let test_dir = "tests/resources/samples/";
        let files = fs::read_dir(test_dir).unwrap();
        let scratch = tempfile::tempdir().unwrap();

        for file in files {
            let file = file.unwrap();
            let file_path = file.path();
            let fname = file.file_name();
            let file_name = fname.to_str().unwrap();
            if !file_name.ends_with(".txt") {
                continue;
            }
            let expected_output_file = format!("{}.out", file_name.strip_suffix(".txt").unwrap());
            let expected_output_path = file_path.with_file_name(expected_output_file);
            let expected_output = fs::read_to_string(&expected_output_path).unwrap();

            let output_path = scratch.path().join(file_name);
            let mut console = Vec::new();
            run(&config(file_path.clone(), output_path.clone()), &mut console).unwrap();

            let output_str = fs::read_to_string(&output_path).unwrap();
            assert_eq!(
                output_str, expected_output,
                "Failed for file: {}",
                file_name
            );

            let console_str = String::from_utf8(console).unwrap();
            assert!(
                console_str.starts_with(&expected_output),
                "Console mismatch for file: {}",
                file_name
            );
        }
    }

    #[test]
    fn test_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "Hello.\r\n").unwrap();

        let mut console = Vec::new();
        let table = run(&config(input.clone(), output.clone()), &mut console).unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.total(), 8);

        let console_str = String::from_utf8(console).unwrap();
        let expected_args = format!("  * Args: {}, {}", input.display(), output.display());
        assert!(console_str.contains("  * Note: Printed Count.txt file output to Console"));
        assert!(console_str.trim_end().ends_with(&expected_args));
    }

    #[test]
    fn test_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");

        let mut console = Vec::new();
        let err = run(&config(dir.path().join("missing.txt"), output.clone()), &mut console)
            .unwrap_err();

        assert!(matches!(err, Error::InputNotFound { .. }));
        assert!(!output.exists());
        assert!(console.is_empty());
    }

    #[test]
    fn test_directory_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");

        let err = run(&config(dir.path().to_path_buf(), output.clone()), &mut Vec::new())
            .unwrap_err();

        assert!(matches!(err, Error::InputNotFound { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_latin1_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("latin1.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, b"caf\xe9\r\n").unwrap();

        let table = run(&config(input, output.clone()), &mut Vec::new()).unwrap();

        assert_eq!(table.total(), 6);
        let report = fs::read_to_string(&output).unwrap();
        assert!(report.contains("        \u{fffd}(65533)\t1\n"));
    }

    #[test]
    fn test_count_file() {
        let (table, read) = count_file(Path::new("tests/resources/samples/pangram.txt")).unwrap();

        assert_eq!(read, table.total());
        assert_eq!(table.get('o').map(|e| e.count()), Some(7));
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "abc").unwrap();
        let output = dir.path().join("no-such-dir").join("out.txt");

        let err = run(&config(input, output), &mut Vec::new()).unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
    }
}
