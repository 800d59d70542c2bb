//! Common test utilities

#![allow(dead_code)]

use richhelp::RenderContext;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a parser definition file
pub fn create_parser_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parser_path = temp_dir.path().join("cli.yml");
    fs::write(&parser_path, content).unwrap();
    (temp_dir, parser_path)
}

/// Create a temporary directory with a richhelp.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("richhelp.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a richhelp.yml in a directory with a subdirectory below it
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("richhelp.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&config_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, config_path, sub_dir)
}

/// Default render settings at a fixed width
pub fn context(width: usize) -> RenderContext {
    RenderContext::default().with_width(width)
}
