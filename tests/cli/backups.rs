use anyhow::Result;

use crate::{CliTest, stdout};

const POD_CS: &str = "class Pod {\n    string title = \"Command Pod\";\n}\n";

fn applied_project() -> Result<CliTest> {
    let test = CliTest::with_file("Source/Pod.cs", POD_CS)?;
    let output = test.extract_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(test.exists("Source/Pod.cs.bak"));
    Ok(test)
}

#[test]
fn test_revert_dry_run() -> Result<()> {
    let test = applied_project()?;

    let output = test.revert_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Would restore Source/Pod.cs"));
    assert!(test.exists("Source/Pod.cs.bak"));
    assert_ne!(test.read_file("Source/Pod.cs")?, POD_CS);

    Ok(())
}

#[test]
fn test_revert_restores_original() -> Result<()> {
    let test = applied_project()?;

    let output = test.revert_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Restored 1 backup"));
    assert_eq!(test.read_file("Source/Pod.cs")?, POD_CS);
    assert!(!test.exists("Source/Pod.cs.bak"));

    Ok(())
}

#[test]
fn test_clean_removes_backups_only() -> Result<()> {
    let test = applied_project()?;
    let rewritten = test.read_file("Source/Pod.cs")?;

    let output = test.clean_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Would remove Source/Pod.cs.bak"));
    assert!(test.exists("Source/Pod.cs.bak"));

    let output = test.clean_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(!test.exists("Source/Pod.cs.bak"));
    assert_eq!(test.read_file("Source/Pod.cs")?, rewritten);

    Ok(())
}

#[test]
fn test_no_backups() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.clean_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No backup files found"));

    Ok(())
}
