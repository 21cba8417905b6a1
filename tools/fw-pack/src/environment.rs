//! Build environment handed back to PlatformIO
//!
//! The packer cannot reach into the SCons environment directly. Instead it builds a
//! `BuildEnvironment` and renders it either as dynamic build flags (one `-D` per
//! line, for `build_flags = !fw-pack flags`) or as JSON for extra scripts.

use serde::Serialize;

/// A single preprocessor define with a string literal value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppDefine {
    pub name: String,
    pub value: String,
}

impl CppDefine {
    /// `NAME="value"`, with the value escaped as a C string literal
    pub fn to_define(&self) -> String {
        format!("{}={}", self.name, c_string_literal(&self.value))
    }

    /// `-DNAME=\"value\"`, quoted for the PlatformIO flag parser
    pub fn to_build_flag(&self) -> String {
        format!("-D{}", self.to_define().replace('"', "\\\""))
    }
}

fn c_string_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Defines and output name for the current build invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnvironment {
    cpp_defines: Vec<CppDefine>,
    prog_name: Option<String>,
}

#[derive(Serialize)]
struct BuildEnvironmentJson<'a> {
    cpp_defines: Vec<String>,
    prog_name: Option<&'a str>,
}

impl BuildEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string define. Existing defines with the same name are kept.
    pub fn append_define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cpp_defines.push(CppDefine {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Replace the output program name
    pub fn replace_prog_name(&mut self, name: impl Into<String>) {
        self.prog_name = Some(name.into());
    }

    pub fn cpp_defines(&self) -> &[CppDefine] {
        &self.cpp_defines
    }

    pub fn prog_name(&self) -> Option<&str> {
        self.prog_name.as_deref()
    }

    /// Dynamic build flags, one per line
    pub fn build_flags(&self) -> String {
        self.cpp_defines
            .iter()
            .map(|define| format!("{}\n", define.to_build_flag()))
            .collect()
    }

    /// JSON rendering for scripts that apply the values themselves
    pub fn to_json(&self) -> serde_json::Result<String> {
        let view = BuildEnvironmentJson {
            cpp_defines: self.cpp_defines.iter().map(CppDefine::to_define).collect(),
            prog_name: self.prog_name.as_deref(),
        };
        serde_json::to_string_pretty(&view)
    }
}
