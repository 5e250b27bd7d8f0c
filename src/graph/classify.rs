//! Suffix-to-output-family dispatch.
//!
//! A static, ordered table maps input file suffixes to the suffix appended
//! to derived output paths. Adding a language's source suffix is a data
//! change here, never a control-flow change elsewhere.

use std::path::Path;

/// Output-suffix families, in match order. Header-like inputs produce
/// precompiled headers; source-like inputs produce objects.
const OUTPUT_SUFFIXES: &[(&str, &[&str])] = &[
    (".gch", &["hh", "H", "hp", "hxx", "hpp", "HPP", "h++", "tcc"]),
    (".o", &["c", "cc", "cp", "cxx", "cpp", "CPP", "c++", "C"]),
];

/// Classify an input path by its suffix.
///
/// Returns the output suffix to append to the derived output path, or
/// `None` when the suffix matches no table entry (the path is then used
/// unchanged). Matching is case-sensitive: `.C` is C++ source, `.c` is C.
pub fn classify(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;

    OUTPUT_SUFFIXES
        .iter()
        .find(|(_, inputs)| inputs.contains(&ext))
        .map(|(output, _)| *output)
}
