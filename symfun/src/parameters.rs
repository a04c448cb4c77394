//! Reading and writing symmetry function parameter files.
//!
//! A parameter file contains one symmetry function per row, as whitespace
//! separated numbers. Rows with three values describe a radial G2 function
//! (`width cutoff center`), and rows with four values describe an angular
//! function (`width cutoff zeta lambda`). The order of the rows is the order
//! of the features.
//!
//! The file can start with a header line containing two integers: the number
//! of functions in the file, and the number of values in the first row.
//! Empty lines and text after `#` are ignored.
//!
//! ```text
//! 3 3
//! 0.01 5.0 0.0
//! 0.1 5.0 2.0
//! 0.01 5.0 1 -1
//! ```
//!
//! Instead of a file, a regular [`ParameterGrid`] can also generate the
//! parameters.
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::descriptors::{AngularKind, DescriptorSet, RadialFunction, SymmetryFunction};
use crate::Error;

struct Header {
    line: usize,
    count: usize,
    width: usize,
}

/// Parse the content of a parameter file. Angular rows are turned into
/// `angular` functions (G4 or G5).
pub fn parse_parameters(content: &str, angular: AngularKind) -> Result<DescriptorSet, Error> {
    let mut header = None;
    let mut first_width = None;
    let mut functions = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_number = i + 1;
        let line = match line.find('#') {
            Some(start) => &line[..start],
            None => line,
        };

        let fields = line.split_whitespace().collect::<Vec<_>>();
        if fields.is_empty() {
            continue;
        }

        let is_first_row = header.is_none() && functions.is_empty();
        if is_first_row && fields.len() == 2 {
            header = Some(parse_header(&fields, line_number)?);
            continue;
        }

        let values = fields.iter()
            .map(|field| field.parse::<f64>().map_err(|_| Error::Parse {
                line: line_number,
                message: format!("invalid number '{}'", field),
            }))
            .collect::<Result<Vec<_>, _>>()?;

        let function: SymmetryFunction = match *values.as_slice() {
            [width, cutoff, center] => RadialFunction::G2 { width, cutoff, center }.into(),
            [width, cutoff, zeta, lambda] => angular.create(width, cutoff, zeta, lambda).into(),
            _ => {
                return Err(Error::Parse {
                    line: line_number,
                    message: format!("expected 3 or 4 values, got {}", values.len()),
                });
            }
        };

        function.validate().map_err(|error| match error {
            Error::InvalidParameter(message) => Error::InvalidParameter(format!(
                "line {}: {}", line_number, message
            )),
            error => error,
        })?;

        first_width.get_or_insert(values.len());
        functions.push(function);
    }

    if let Some(header) = header {
        if header.count != functions.len() {
            return Err(Error::Parse {
                line: header.line,
                message: format!(
                    "header announces {} symmetry functions, but the file contains {}",
                    header.count, functions.len()
                ),
            });
        }

        if let Some(width) = first_width {
            if header.width != width {
                return Err(Error::Parse {
                    line: header.line,
                    message: format!(
                        "header announces {} values in the first row, but it contains {}",
                        header.width, width
                    ),
                });
            }
        }
    }

    debug!("read {} symmetry functions from parameter file", functions.len());
    return DescriptorSet::new(functions);
}

fn parse_header(fields: &[&str], line: usize) -> Result<Header, Error> {
    let parse = |field: &str| field.parse::<usize>().map_err(|_| Error::Parse {
        line: line,
        message: format!(
            "expected 3 or 4 values, got 2 (a header line must contain two integers, got '{}')",
            fields.join(" ")
        ),
    });

    Ok(Header {
        line: line,
        count: parse(fields[0])?,
        width: parse(fields[1])?,
    })
}

/// Read the parameter file at the given `path`. Angular rows are turned into
/// `angular` functions (G4 or G5).
pub fn read_parameters(path: impl AsRef<Path>, angular: AngularKind) -> Result<DescriptorSet, Error> {
    let content = std::fs::read_to_string(path)?;
    return parse_parameters(&content, angular);
}

/// Check that all angular functions in this set are either G4 or G5, and that
/// radial functions are all G2.
fn check_representable(set: &DescriptorSet) -> Result<(), Error> {
    let mut kind = None;
    for function in set.functions() {
        match function {
            SymmetryFunction::Radial(RadialFunction::G2 { .. }) => {}
            SymmetryFunction::Radial(_) => {
                return Err(Error::InvalidParameter(format!(
                    "{} functions can not be written to a parameter file", function.name()
                )));
            }
            SymmetryFunction::Angular(angular) => {
                let current = AngularKind::of(angular);
                if *kind.get_or_insert(current) != current {
                    return Err(Error::InvalidParameter(
                        "can not write both G4 and G5 functions to the same parameter file".into()
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Write the functions in `set` with the parameter file format to `writer`.
///
/// Values are written with enough digits to be read back exactly. Only G2, G4
/// and G5 functions can be written, and G4 can not be mixed with G5.
pub fn write_parameters(set: &DescriptorSet, mut writer: impl Write) -> Result<(), Error> {
    check_representable(set)?;

    let first_width = match set.functions().first() {
        Some(SymmetryFunction::Radial(_)) => 3,
        Some(SymmetryFunction::Angular(_)) => 4,
        None => 0,
    };
    writeln!(writer, "{} {}", set.len(), first_width)?;

    for function in set.functions() {
        match function {
            SymmetryFunction::Radial(RadialFunction::G2 { width, cutoff, center }) => {
                writeln!(writer, "{} {} {}", width, cutoff, center)?;
            }
            SymmetryFunction::Angular(angular) => {
                let (width, cutoff, zeta, lambda) = angular.parameters();
                writeln!(writer, "{} {} {} {}", width, cutoff, zeta, lambda)?;
            }
            SymmetryFunction::Radial(_) => unreachable!("checked by check_representable"),
        }
    }

    return Ok(());
}

/// Write the functions in `set` to a new parameter file at `path`
pub fn save_parameters(set: &DescriptorSet, path: impl AsRef<Path>) -> Result<(), Error> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_parameters(set, &mut file)?;
    file.flush()?;
    Ok(())
}

fn default_angular_width() -> f64 { 0.005 }

/// Regular grid of symmetry function parameters, sharing the same cutoff.
///
/// Radial G2 functions have their centers evenly spaced in `[0, cutoff)`, and
/// a width `η = 1 / (2 Δ²)` where `Δ` is the spacing between centers. Angular
/// functions take `ζ = 1, 1, 2, 2, 4, 4, ...` with `λ` alternating between +1
/// and -1.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ParameterGrid {
    /// cutoff radius of all functions
    pub cutoff: f64,
    /// number of radial G2 functions
    #[serde(default)]
    pub radial: usize,
    /// number of angular functions
    #[serde(default)]
    pub angular: usize,
    /// kind of angular functions to create
    #[serde(default)]
    pub angular_kind: AngularKind,
    /// width `η` of the angular functions
    #[serde(default = "default_angular_width")]
    pub angular_width: f64,
}

impl ParameterGrid {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.cutoff.is_finite() && self.cutoff > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected a positive cutoff radius, got {}", self.cutoff
            )));
        }

        if self.radial == 0 && self.angular == 0 {
            return Err(Error::InvalidParameter(
                "parameter grid must contain at least one function".into()
            ));
        }

        if !(self.angular_width.is_finite() && self.angular_width >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected a non-negative angular width, got {}", self.angular_width
            )));
        }

        Ok(())
    }

    /// Create the symmetry functions on this grid, radial functions first
    pub fn generate(&self) -> Result<DescriptorSet, Error> {
        self.validate()?;

        let mut functions: Vec<SymmetryFunction> = Vec::with_capacity(self.radial + self.angular);
        if self.radial > 0 {
            let spacing = self.cutoff / self.radial as f64;
            let width = 1.0 / (2.0 * spacing * spacing);
            for i in 0..self.radial {
                functions.push(RadialFunction::G2 {
                    width: width,
                    cutoff: self.cutoff,
                    center: i as f64 * spacing,
                }.into());
            }
        }

        for i in 0..self.angular {
            let zeta = f64::powi(2.0, (i / 2) as i32);
            let lambda = if i % 2 == 0 { 1.0 } else { -1.0 };
            functions.push(self.angular_kind.create(self.angular_width, self.cutoff, zeta, lambda).into());
        }

        debug!(
            "generated {} radial and {} angular symmetry functions with cutoff {}",
            self.radial, self.angular, self.cutoff
        );
        return DescriptorSet::new(functions);
    }
}
