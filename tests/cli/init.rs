use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .ksplocrc.json"));

    let content = test.read_file(".ksplocrc.json")?;
    insta::assert_snapshot!(content, @r#"
    {
      "prefix": "MyMod",
      "maxKeyLength": 25,
      "numericTags": false,
      "separatePartsCfg": false,
      "codeOnly": false,
      "cfgOnly": false,
      "includeStrings": [],
      "excludeStrings": [],
      "includeFiles": [],
      "excludeFiles": [],
      "celestialBodies": []
    }
    "#);

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".ksplocrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".ksplocrc.json already exists"));
    assert_eq!(test.read_file(".ksplocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    let parsed: Value =
        serde_json::from_str(&test.read_file(".ksplocrc.json")?).context("valid JSON")?;
    assert_eq!(parsed["prefix"], "MyMod");

    test.write_file("Source/Pod.cs", "class Pod { int n = 1; }\n")?;
    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "extract should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
