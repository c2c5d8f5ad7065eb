//! Construction of distributions from configuration nodes.
//!
//! A node names the distribution with a `type` discriminator and carries
//! its numbers in `parameters`, either as a list or as whitespace
//! separated text (the layout of XML element content):
//!
//! ```text
//! { "type": "tabular", "interpolation": "linear-linear",
//!   "parameters": "0.0 1.0 2.0  0.0 1.0 0.0" }
//! ```
//!
//! | type | parameters |
//! |---|---|
//! | `uniform` | a b |
//! | `maxwell` | θ |
//! | `watt` | a b |
//! | `discrete` | x₀ … xₙ₋₁ p₀ … pₙ₋₁ |
//! | `tabular` | x₀ … xₙ₋₁ p₀ … pₙ₋₁ |
//! | `equiprobable` | x₀ … xₙ₋₁ |
//!
//! The sampling types never see this format; they are built from plain
//! slices.

use serde::Deserialize;

use crate::distributions::{
    Discrete, Distribution, DistributionError, Equiprobable, Maxwell, Tabular, Uniform, Watt,
};
use crate::interpolation::Interpolation;

/// Numeric payload of a configuration node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Parameters {
    List(Vec<f64>),
    Text(String),
}

impl Parameters {
    /// Parses the payload into numbers.
    ///
    /// # Errors
    /// Returns [`DistributionError::InvalidNumber`] for the first text
    /// token that is not a number.
    pub fn values(&self) -> Result<Vec<f64>, DistributionError> {
        match self {
            Parameters::List(v) => Ok(v.clone()),
            Parameters::Text(s) => s
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>()
                        .map_err(|_| DistributionError::InvalidNumber(tok.to_string()))
                })
                .collect(),
        }
    }
}

impl From<Vec<f64>> for Parameters {
    fn from(v: Vec<f64>) -> Self {
        Parameters::List(v)
    }
}

impl From<&str> for Parameters {
    fn from(s: &str) -> Self {
        Parameters::Text(s.to_string())
    }
}

/// A configuration node describing one distribution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DistributionConfig {
    /// Type discriminator (`uniform`, `maxwell`, `watt`, `discrete`,
    /// `tabular`, `equiprobable`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub parameters: Option<Parameters>,
    /// Interpolation rule for `tabular`; histogram when absent.
    #[serde(default)]
    pub interpolation: Option<String>,
}

impl DistributionConfig {
    /// Starts a node with the given type discriminator.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn with_parameters(mut self, parameters: impl Into<Parameters>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }

    pub fn with_interpolation(mut self, rule: Interpolation) -> Self {
        self.interpolation = Some(rule.as_str().to_string());
        self
    }
}

/// Builds the distribution described by `node`.
///
/// # Errors
/// - [`DistributionError::MissingType`] if the node has no `type`
/// - [`DistributionError::UnknownType`] if `type` names no distribution
/// - [`DistributionError::MissingParameters`] if `parameters` is absent
/// - [`DistributionError::ParameterCount`] for a wrong fixed arity
/// - [`DistributionError::LengthMismatch`] for an odd `x…p…` payload
/// - [`DistributionError::InvalidParameters`] for an `interpolation` on a
///   type other than `tabular`
/// - any error of the variant's constructor, unchanged
///
/// # Examples
/// ```
/// use u_sampling::{distribution_from_config, DistributionConfig};
/// let node = DistributionConfig::new("watt").with_parameters("0.988e6 2.249e-6");
/// let dist = distribution_from_config(&node).unwrap();
/// assert_eq!(dist.kind(), "watt");
/// ```
pub fn distribution_from_config(
    node: &DistributionConfig,
) -> Result<Distribution, DistributionError> {
    let kind = node.kind.as_deref().ok_or(DistributionError::MissingType)?;

    let dist: Distribution = match kind {
        "uniform" => {
            let v = fixed(node, "uniform", 2)?;
            Uniform::new(v[0], v[1])?.into()
        }
        "maxwell" => {
            let v = fixed(node, "maxwell", 1)?;
            Maxwell::new(v[0])?.into()
        }
        "watt" => {
            let v = fixed(node, "watt", 2)?;
            Watt::new(v[0], v[1])?.into()
        }
        "discrete" => {
            let v = values(node, "discrete")?;
            let (x, p) = split_pairs(&v)?;
            Discrete::new(x, p)?.into()
        }
        "tabular" => {
            let interp = match node.interpolation.as_deref() {
                Some(s) => s.parse::<Interpolation>()?,
                None => Interpolation::Histogram,
            };
            let v = values(node, "tabular")?;
            let (x, p) = split_pairs(&v)?;
            Tabular::new(x, p, interp, None)?.into()
        }
        "equiprobable" => {
            let v = values(node, "equiprobable")?;
            Equiprobable::new(&v)?.into()
        }
        other => return Err(DistributionError::UnknownType(other.to_string())),
    };

    if kind != "tabular" {
        if let Some(rule) = node.interpolation.as_deref() {
            return Err(DistributionError::InvalidParameters(format!(
                "interpolation {rule:?} given for a {kind} distribution; only tabular accepts one"
            )));
        }
    }

    log::debug!("built {} distribution", dist.kind());
    Ok(dist)
}

/// Deserializes a JSON configuration node and builds it.
///
/// # Examples
/// ```
/// use u_sampling::distribution_from_json;
/// let dist = distribution_from_json(r#"{"type": "maxwell", "parameters": [1.0e6]}"#).unwrap();
/// assert!((dist.mean() - 1.5e6).abs() < 1e-6);
/// ```
pub fn distribution_from_json(json: &str) -> Result<Distribution, DistributionError> {
    let node: DistributionConfig = serde_json::from_str(json)?;
    distribution_from_config(&node)
}

fn values(node: &DistributionConfig, kind: &'static str) -> Result<Vec<f64>, DistributionError> {
    node.parameters
        .as_ref()
        .ok_or(DistributionError::MissingParameters(kind))?
        .values()
}

fn fixed(
    node: &DistributionConfig,
    kind: &'static str,
    expected: usize,
) -> Result<Vec<f64>, DistributionError> {
    let v = values(node, kind)?;
    if v.len() != expected {
        return Err(DistributionError::ParameterCount {
            kind,
            expected,
            got: v.len(),
        });
    }
    Ok(v)
}

/// Splits `x₀ … xₙ₋₁ p₀ … pₙ₋₁` into its two halves.
fn split_pairs(v: &[f64]) -> Result<(&[f64], &[f64]), DistributionError> {
    let half = v.len() / 2;
    let (x, p) = v.split_at(half);
    if x.len() != p.len() {
        return Err(DistributionError::LengthMismatch {
            expected: x.len(),
            got: p.len(),
        });
    }
    Ok((x, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parameters_text_and_list_agree() {
        let text = Parameters::from(" 1.0\n2.5e3\t-4 ");
        let list = Parameters::from(vec![1.0, 2.5e3, -4.0]);
        assert_eq!(text.values().unwrap(), list.values().unwrap());
    }

    #[test]
    fn test_parameters_bad_token() {
        let err = Parameters::from("1.0 two 3.0").values().unwrap_err();
        assert_eq!(err, DistributionError::InvalidNumber("two".into()));
    }

    #[test]
    fn test_builds_each_type() {
        let cases = [
            ("uniform", "0 1"),
            ("maxwell", "1.2895e6"),
            ("watt", "0.988e6 2.249e-6"),
            ("discrete", "1 2 3 0.2 0.3 0.5"),
            ("tabular", "0 1 2 1 1 0"),
            ("equiprobable", "0 1 2 3"),
        ];
        for (kind, params) in cases {
            let node = DistributionConfig::new(kind).with_parameters(params);
            let dist = distribution_from_config(&node).unwrap();
            assert_eq!(dist.kind(), kind);
        }
    }

    #[test]
    fn test_tabular_interpolation() {
        let node = DistributionConfig::new("tabular")
            .with_parameters(vec![0.0, 1.0, 2.0, 0.0, 1.0, 0.0])
            .with_interpolation(Interpolation::LinLin);
        match distribution_from_config(&node).unwrap() {
            Distribution::Tabular(t) => {
                assert_eq!(t.interpolation(), Interpolation::LinLin);
                assert_relative_eq!(t.mean(), 1.0, epsilon = 1e-12);
            }
            other => panic!("expected tabular, got {other:?}"),
        }
    }

    #[test]
    fn test_tabular_defaults_to_histogram() {
        let node = DistributionConfig::new("tabular").with_parameters("0 1 1 1");
        match distribution_from_config(&node).unwrap() {
            Distribution::Tabular(t) => assert_eq!(t.interpolation(), Interpolation::Histogram),
            other => panic!("expected tabular, got {other:?}"),
        }
    }

    #[test]
    fn test_tabular_log_rule_rejected() {
        let mut node = DistributionConfig::new("tabular").with_parameters("1 2 1 1");
        node.interpolation = Some("log-log".into());
        assert_eq!(
            distribution_from_config(&node).unwrap_err(),
            DistributionError::UnsupportedInterpolation(Interpolation::LogLog)
        );
        node.interpolation = Some("spline".into());
        assert_eq!(
            distribution_from_config(&node).unwrap_err(),
            DistributionError::InvalidInterpolation("spline".into())
        );
    }

    #[test]
    fn test_interpolation_only_on_tabular() {
        let mut node = DistributionConfig::new("equiprobable").with_parameters("0 1 2");
        node.interpolation = Some("linear-linear".into());
        assert!(matches!(
            distribution_from_config(&node),
            Err(DistributionError::InvalidParameters(_))
        ));
        assert!(matches!(
            distribution_from_json(
                r#"{"type": "uniform", "interpolation": "histogram", "parameters": [0, 1]}"#
            ),
            Err(DistributionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_missing_type() {
        let node = DistributionConfig {
            parameters: Some(vec![1.0].into()),
            ..DistributionConfig::default()
        };
        assert_eq!(
            distribution_from_config(&node).unwrap_err(),
            DistributionError::MissingType
        );
    }

    #[test]
    fn test_unknown_type() {
        let node = DistributionConfig::new("normal").with_parameters("0 1");
        assert_eq!(
            distribution_from_config(&node).unwrap_err(),
            DistributionError::UnknownType("normal".into())
        );
    }

    #[test]
    fn test_missing_parameters() {
        let node = DistributionConfig::new("maxwell");
        assert_eq!(
            distribution_from_config(&node).unwrap_err(),
            DistributionError::MissingParameters("maxwell")
        );
    }

    #[test]
    fn test_wrong_arity() {
        let node = DistributionConfig::new("watt").with_parameters("1.0");
        assert_eq!(
            distribution_from_config(&node).unwrap_err(),
            DistributionError::ParameterCount {
                kind: "watt",
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_odd_pair_payload() {
        let node = DistributionConfig::new("discrete").with_parameters("1 2 0.5");
        assert_eq!(
            distribution_from_config(&node).unwrap_err(),
            DistributionError::LengthMismatch { expected: 1, got: 2 }
        );
    }

    #[test]
    fn test_variant_errors_propagate() {
        let node = DistributionConfig::new("uniform").with_parameters("3 1");
        assert!(matches!(
            distribution_from_config(&node),
            Err(DistributionError::InvalidParameters(_))
        ));
        let node = DistributionConfig::new("tabular").with_parameters("0 2 1 1 1 1");
        assert!(matches!(
            distribution_from_config(&node),
            Err(DistributionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_json_node() {
        let dist = distribution_from_json(
            r#"{"type": "tabular", "interpolation": "linear-linear", "parameters": "0 1 2 0 1 0"}"#,
        )
        .unwrap();
        assert_eq!(dist.kind(), "tabular");
    }

    #[test]
    fn test_json_built_distributions_sample_their_mean() {
        use crate::random::create_rng;
        use crate::stats::WelfordAccumulator;

        let nodes = [
            r#"{"type": "uniform", "parameters": [2.0, 6.0]}"#,
            r#"{"type": "discrete", "parameters": "1 2 3 1 1 2"}"#,
            r#"{"type": "tabular", "interpolation": "linear-linear",
              "parameters": [0,1,2,0,1,0]}"#,
            r#"{"type": "equiprobable", "parameters": "0 1 4"}"#,
            r#"{"type": "watt", "parameters": [0.988e6, 2.249e-6]}"#,
        ];
        let mut rng = create_rng(2024);
        for json in nodes {
            let dist = distribution_from_json(json).unwrap();
            let mut acc = WelfordAccumulator::new();
            acc.extend((0..50_000).map(|_| dist.sample(&mut rng)));
            let se = acc.std_error().unwrap();
            let mean = acc.mean().unwrap();
            assert!(
                (mean - dist.mean()).abs() < 5.0 * se,
                "{}: mean {mean} vs {} (se {se})",
                dist.kind(),
                dist.mean()
            );
        }
    }

    #[test]
    fn test_json_malformed() {
        assert!(matches!(
            distribution_from_json("{\"type\": "),
            Err(DistributionError::Malformed(_))
        ));
        assert!(matches!(
            distribution_from_json(r#"{"type": "uniform", "parameters": {"a": 1}}"#),
            Err(DistributionError::Malformed(_))
        ));
    }
}
