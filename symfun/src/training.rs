//! Generation of training data for neural network potentials: symmetry
//! functions or raw neighbor coordinates as inputs, and reference energies
//! (optionally with forces) as outputs.
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use ndarray::{s, Array2, ArrayView2, Axis};
use rayon::prelude::*;

use crate::descriptors::{AngularKind, DescriptorSet};
use crate::parameters::ParameterGrid;
use crate::potentials::PotentialParameters;
use crate::sampling::{read_neighbour_file, Sampler, SamplerParameters};
use crate::systems::Structure;
use crate::{Error, NeighborGeometry};

/// Number of geometries created by synthetic sources when `samples` is not
/// given
pub const DEFAULT_SYNTHETIC_SAMPLES: usize = 1000;

fn default_test_fraction() -> f64 { 0.1 }

/// Where the neighbor geometries come from
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(tag = "type")]
pub enum DataSource {
    /// Random geometries
    Synthetic(SamplerParameters),
    /// Neighbour lists and energies from a LAMMPS simulation
    NeighbourFile {
        path: PathBuf,
        #[serde(default)]
        multi_type: bool,
    },
    /// All atoms in structure files readable by chemfiles
    Structures {
        path: PathBuf,
        /// only use atoms with this type as central atoms
        #[serde(default)]
        center_type: Option<i32>,
    },
}

/// Input features given to the network, as used in configuration files
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(tag = "type")]
pub enum InputParameters {
    /// Symmetry functions from a parameter file
    ParameterFile {
        path: PathBuf,
        /// angular function to use for four-values rows
        #[serde(default)]
        angular: AngularKind,
    },
    /// Symmetry functions on a regular grid of parameters
    Grid(ParameterGrid),
    /// Distances to the neighbors, one column per neighbor
    Distances,
    /// Cartesian offsets and distance to the neighbors, four columns `x y z r`
    /// per neighbor
    Coordinates,
}

impl InputParameters {
    /// Read or generate the symmetry functions if needed, and create the
    /// corresponding `Inputs`
    pub fn build(&self) -> Result<Inputs, Error> {
        let inputs = match self {
            InputParameters::ParameterFile { path, angular } => {
                Inputs::SymmetryFunctions(crate::parameters::read_parameters(path, *angular)?)
            }
            InputParameters::Grid(grid) => Inputs::SymmetryFunctions(grid.generate()?),
            InputParameters::Distances => Inputs::Distances,
            InputParameters::Coordinates => Inputs::Coordinates,
        };
        return Ok(inputs);
    }
}

/// Transformation of neighbor geometries into rows of input features
#[derive(Debug, Clone, PartialEq)]
pub enum Inputs {
    SymmetryFunctions(DescriptorSet),
    Distances,
    Coordinates,
}

impl Inputs {
    /// Get the symmetry functions, if these inputs use them
    pub fn descriptors(&self) -> Option<&DescriptorSet> {
        match self {
            Inputs::SymmetryFunctions(set) => Some(set),
            Inputs::Distances | Inputs::Coordinates => None,
        }
    }

    /// Largest distance at which neighbors change the features, `None` for
    /// raw inputs which include all neighbors
    pub fn cutoff(&self) -> Option<f64> {
        self.descriptors().map(DescriptorSet::max_cutoff)
    }

    /// Compute the features of all `geometries`, one row per geometry.
    ///
    /// Raw inputs have as many columns as required for the geometry with the
    /// most neighbors. Geometries with fewer neighbors are padded with zeros.
    pub fn compute(&self, geometries: &[NeighborGeometry]) -> Result<Array2<f64>, Error> {
        if let Inputs::SymmetryFunctions(set) = self {
            return set.compute_many(geometries);
        }

        let max_neighbors = geometries.iter().map(NeighborGeometry::len).max().unwrap_or(0);
        let per_neighbor = if *self == Inputs::Coordinates { 4 } else { 1 };

        let mut features = Array2::zeros((geometries.len(), per_neighbor * max_neighbors));
        for (mut row, geometry) in features.rows_mut().into_iter().zip(geometries) {
            geometry.validate()?;
            match (self, geometry) {
                (Inputs::Coordinates, NeighborGeometry::Cartesian(offsets)) => {
                    for (j, offset) in offsets.iter().enumerate() {
                        row[4 * j] = offset[0];
                        row[4 * j + 1] = offset[1];
                        row[4 * j + 2] = offset[2];
                        row[4 * j + 3] = offset.norm();
                    }
                }
                (Inputs::Coordinates, _) => {
                    return Err(Error::Shape(
                        "coordinates inputs require the Cartesian offsets to the neighbors".into()
                    ));
                }
                _ => {
                    for (j, &r) in geometry.distances().iter().enumerate() {
                        row[j] = r;
                    }
                }
            }
        }

        return Ok(features);
    }
}

/// Reference values computed for each sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum Targets {
    /// Energy of the central atom
    #[default]
    Energy,
    /// Force on the central atom and its energy
    EnergyAndForces,
}

/// Options for the generation of training data
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TrainingOptions {
    pub source: DataSource,
    /// Input features of the network
    pub inputs: InputParameters,
    #[serde(default)]
    pub targets: Targets,
    /// Number of geometries to generate for synthetic sources (defaults to
    /// `DEFAULT_SYNTHETIC_SAMPLES`), or largest number of central atoms to
    /// keep from files (defaults to all of them)
    #[serde(default)]
    pub samples: Option<usize>,
    /// Fraction of the samples kept aside for testing
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// Potential giving the reference energies. Required for synthetic and
    /// structure sources and for forces; for neighbour files this replaces
    /// the energies in the file.
    #[serde(default)]
    pub potential: Option<PotentialParameters>,
}

impl TrainingOptions {
    /// Read options from a JSON string
    pub fn from_json(json: &str) -> Result<TrainingOptions, Error> {
        let options: TrainingOptions = serde_json::from_str(json)?;
        options.validate()?;
        return Ok(options);
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(Error::InvalidParameter(format!(
                "test_fraction must be in [0, 1), got {}", self.test_fraction
            )));
        }

        if self.samples == Some(0) {
            return Err(Error::InvalidParameter("samples must be at least 1".into()));
        }

        if let DataSource::Synthetic(parameters) = &self.source {
            parameters.validate()?;
        }

        if let InputParameters::Grid(grid) = &self.inputs {
            grid.validate()?;
        }

        Ok(())
    }

    /// Read or generate the symmetry functions, and create the inputs
    pub fn inputs(&self) -> Result<Inputs, Error> {
        self.inputs.build()
    }
}

/// Number of central atoms to keep from a file containing `count` of them
fn keep_first(count: usize, samples: Option<usize>, path: &Path) -> usize {
    match samples {
        Some(max) if max < count => {
            warn!(
                "only keeping the first {} of the {} central atoms in '{}'",
                max, count, path.display()
            );
            max
        }
        _ => count,
    }
}

/// Cutoff used to find neighbors in structures: the largest of the feature
/// and potential cutoffs. A potential without cutoff (such as Lennard-Jones
/// without `cutoff`) only sees the neighbors inside the feature cutoff.
fn neighbor_cutoff(inputs: &Inputs, potential: Option<&PotentialParameters>) -> Result<f64, Error> {
    let mut cutoff = inputs.cutoff();
    if let Some(parameters) = potential {
        let potential = parameters.clone().build()?;
        let potential_cutoff = potential.cutoff();
        if potential_cutoff.is_finite() {
            cutoff = Some(cutoff.map_or(potential_cutoff, |c| f64::max(c, potential_cutoff)));
        } else if let Some(cutoff) = cutoff {
            info!(
                "{} potential has no cutoff, only neighbors closer than {} are included",
                potential.name(), cutoff
            );
        }
    }

    return cutoff.ok_or_else(|| Error::InvalidParameter(
        "structure sources require a finite cutoff, from the symmetry functions or the potential".into()
    ));
}

/// Get the neighbor geometry around all atoms of `center_type` (or all atoms)
/// in all `structures`
fn structure_geometries(
    structures: &[Structure],
    center_type: Option<i32>,
    cutoff: f64,
) -> Result<Vec<NeighborGeometry>, Error> {
    let mut geometries = Vec::new();
    for structure in structures {
        geometries.extend(structure.all_neighbors(cutoff, center_type)?);
    }
    return Ok(geometries);
}

/// Input features and reference values, one row per sample
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData {
    /// input features, with shape `(samples, features)`
    pub features: Array2<f64>,
    /// energies, with shape `(samples, 1)`
    pub energies: Array2<f64>,
    /// forces on the central atoms, with shape `(samples, 3)`
    pub forces: Option<Array2<f64>>,
}

impl TrainingData {
    /// Create training data from existing features and energies
    pub fn new(features: Array2<f64>, energies: Vec<f64>) -> Result<TrainingData, Error> {
        if features.nrows() != energies.len() {
            return Err(Error::Shape(format!(
                "got {} rows of features but {} energies", features.nrows(), energies.len()
            )));
        }

        let n_samples = energies.len();
        let energies = Array2::from_shape_vec((n_samples, 1), energies)
            .map_err(|e| Error::Shape(e.to_string()))?;

        return Ok(TrainingData { features, energies, forces: None });
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reference outputs of the network: energies with shape `(samples, 1)`,
    /// or forces followed by energies (`Fx Fy Fz E`) with shape `(samples,
    /// 4)` when forces are available.
    pub fn outputs(&self) -> Result<Array2<f64>, Error> {
        match &self.forces {
            Some(forces) => ndarray::concatenate(Axis(1), &[forces.view(), self.energies.view()])
                .map_err(|e| Error::Shape(e.to_string())),
            None => Ok(self.energies.clone()),
        }
    }

    /// Compute features for all `geometries`, and reference values with the
    /// given potential if any. Without potential, `energies` are used as is
    /// and forces can not be computed.
    pub fn from_geometries(
        inputs: &Inputs,
        geometries: &[NeighborGeometry],
        potential: Option<&PotentialParameters>,
        energies: Option<Vec<f64>>,
        targets: Targets,
    ) -> Result<TrainingData, Error> {
        let features = inputs.compute(geometries)?;

        let potential = match potential {
            Some(parameters) => Some(parameters.clone().build()?),
            None => None,
        };

        let energies = match (&potential, energies) {
            (Some(potential), _) => {
                time_graph::spanned!("reference energies", {
                    geometries.par_iter()
                        .map(|geometry| potential.energy(geometry))
                        .collect::<Result<Vec<_>, Error>>()?
                })
            }
            (None, Some(energies)) => energies,
            (None, None) => {
                return Err(Error::InvalidParameter(
                    "a potential is required to compute energies for this data source".into()
                ));
            }
        };

        let mut data = TrainingData::new(features, energies)?;
        if targets == Targets::EnergyAndForces {
            let potential = potential.ok_or_else(|| Error::InvalidParameter(
                "a potential is required to compute forces".into()
            ))?;

            let forces = time_graph::spanned!("reference forces", {
                geometries.par_iter()
                    .map(|geometry| potential.force(geometry))
                    .collect::<Result<Vec<_>, Error>>()?
            });
            data.forces = Some(Array2::from_shape_fn((forces.len(), 3), |(i, k)| forces[i][k]));
        }

        return Ok(data);
    }

    /// Generate all the training data described by `options`, using the given
    /// `inputs`.
    pub fn generate(options: &TrainingOptions, inputs: &Inputs) -> Result<TrainingData, Error> {
        options.validate()?;
        match inputs.descriptors() {
            Some(set) => info!("generating training data with {} symmetry functions", set.len()),
            None => info!("generating training data with raw neighbor inputs"),
        }

        let potential = options.potential.as_ref();
        let data = match &options.source {
            DataSource::Synthetic(parameters) => {
                if let Some(cutoff) = inputs.cutoff() {
                    if parameters.max_distance > cutoff {
                        warn!(
                            "neighbors are sampled up to {}, further than the largest cutoff ({})",
                            parameters.max_distance, cutoff
                        );
                    }
                }

                let mut sampler = Sampler::new(parameters.clone())?;
                let geometries = sampler.samples(options.samples.unwrap_or(DEFAULT_SYNTHETIC_SAMPLES));
                TrainingData::from_geometries(inputs, &geometries, potential, None, options.targets)?
            }
            DataSource::NeighbourFile { path, multi_type } => {
                let mut data = read_neighbour_file(path, *multi_type)?;
                data.truncate(keep_first(data.len(), options.samples, path));
                TrainingData::from_geometries(
                    inputs, &data.geometries, potential, Some(data.energies), options.targets
                )?
            }
            DataSource::Structures { path, center_type } => {
                let structures = crate::systems::read_from_file(path)?;
                let cutoff = neighbor_cutoff(inputs, potential)?;
                debug!("searching neighbors in '{}' up to {}", path.display(), cutoff);

                let mut geometries = structure_geometries(&structures, *center_type, cutoff)?;
                geometries.truncate(keep_first(geometries.len(), options.samples, path));
                TrainingData::from_geometries(inputs, &geometries, potential, None, options.targets)?
            }
        };

        info!("generated {} samples", data.len());
        return Ok(data);
    }

    /// Split this data in a training and a test set. The last
    /// `round(test_fraction * len)` samples go to the test set, so the split is
    /// deterministic.
    pub fn split(self, test_fraction: f64) -> Result<(TrainingData, TrainingData), Error> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(Error::InvalidParameter(format!(
                "test_fraction must be in [0, 1), got {}", test_fraction
            )));
        }

        let n_test = f64::round(test_fraction * self.len() as f64) as usize;
        let n_train = self.len() - n_test;

        let train = TrainingData {
            features: self.features.slice(s![..n_train, ..]).to_owned(),
            energies: self.energies.slice(s![..n_train, ..]).to_owned(),
            forces: self.forces.as_ref().map(|f| f.slice(s![..n_train, ..]).to_owned()),
        };
        let test = TrainingData {
            features: self.features.slice(s![n_train.., ..]).to_owned(),
            energies: self.energies.slice(s![n_train.., ..]).to_owned(),
            forces: self.forces.as_ref().map(|f| f.slice(s![n_train.., ..]).to_owned()),
        };

        info!("training set size: {}, test set size: {}", train.len(), test.len());
        return Ok((train, test));
    }
}

/// Create the inputs and generate train and test data from `options`
pub fn prepare(options: &TrainingOptions) -> Result<(Inputs, TrainingData, TrainingData), Error> {
    let inputs = options.inputs()?;
    let data = TrainingData::generate(options, &inputs)?;
    let (train, test) = data.split(options.test_fraction)?;
    return Ok((inputs, train, test));
}

/// Write symmetry function values to `writer`, one sample per line
pub fn write_symmetry_values(values: ArrayView2<f64>, mut writer: impl Write) -> Result<(), Error> {
    for row in values.rows() {
        let line = row.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Write symmetry function values to a new file at `path`
pub fn save_symmetry_values(values: ArrayView2<f64>, path: impl AsRef<Path>) -> Result<(), Error> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_symmetry_values(values, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Parse symmetry function values, one sample per line. All lines must have
/// the same number of values.
pub fn parse_symmetry_values(content: &str) -> Result<Array2<f64>, Error> {
    let mut width = None;
    let mut n_rows = 0;
    let mut values = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_number = i + 1;
        let row = line.split_whitespace()
            .map(|field| field.parse::<f64>().map_err(|_| Error::Parse {
                line: line_number,
                message: format!("invalid number '{}'", field),
            }))
            .collect::<Result<Vec<_>, _>>()?;

        if row.is_empty() {
            continue;
        }

        let expected = *width.get_or_insert(row.len());
        if row.len() != expected {
            return Err(Error::Parse {
                line: line_number,
                message: format!("expected {} values, got {}", expected, row.len()),
            });
        }

        values.extend(row);
        n_rows += 1;
    }

    return Array2::from_shape_vec((n_rows, width.unwrap_or(0)), values)
        .map_err(|e| Error::Shape(e.to_string()));
}

/// Read symmetry function values from the file at `path`
pub fn read_symmetry_values(path: impl AsRef<Path>) -> Result<Array2<f64>, Error> {
    let content = std::fs::read_to_string(path)?;
    return parse_symmetry_values(&content);
}
