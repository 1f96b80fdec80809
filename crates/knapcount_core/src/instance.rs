use serde::{Deserialize, Serialize};

use crate::error::{CountError, Result};

/// One counting problem: find the number of nonnegative integer tuples x
/// with Σ aᵢxᵢ = b.
///
/// Immutable once loaded; `name` is for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub a: Vec<u32>,
    pub b: u64,
    #[serde(default)]
    pub name: String,
}

impl Instance {
    pub fn new(a: Vec<u32>, b: u64, name: impl Into<String>) -> Result<Self> {
        let instance = Self {
            a,
            b,
            name: name.into(),
        };
        instance.validate()?;
        Ok(instance)
    }

    /// Checks the structural requirements before any numerical work:
    /// at least one coefficient, all coefficients positive, positive target.
    pub fn validate(&self) -> Result<()> {
        if self.a.is_empty() {
            return Err(CountError::InstanceFormat(
                "instance has no coefficients".into(),
            ));
        }
        if self.a.iter().any(|&ai| ai == 0) {
            return Err(CountError::InstanceFormat(
                "coefficients must be positive integers".into(),
            ));
        }
        if self.b == 0 {
            return Err(CountError::InstanceFormat(
                "target b must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}

/// Parses a Pisinger-style benchmark file into its instances.
///
/// The format is line oriented, fields whitespace separated:
/// - a line whose first token is `c` carries the target value in its second
///   field;
/// - a line whose first token starts with `time` opens an instance's
///   coefficient block;
/// - a `-----` line terminates the current block;
/// - inside a block, the third comma-separated sub-field of each line's
///   first token is one coefficient.
///
/// A coefficient block still open at end of input is an error rather than
/// silently dropped, as is a mismatch between the number of targets and the
/// number of blocks.
pub fn parse_pisinger(input: &str) -> Result<Vec<Instance>> {
    let mut targets: Vec<u64> = Vec::new();
    let mut blocks: Vec<Vec<u32>> = Vec::new();
    let mut current: Vec<u32> = Vec::new();
    let mut in_block = false;

    for (idx, line) in input.lines().enumerate() {
        let lineno = idx + 1;
        let mut fields = line.split_whitespace();
        let Some(first) = fields.next() else {
            continue;
        };

        if first == "c" {
            let value = fields.next().ok_or_else(|| {
                CountError::InstanceFormat(format!("line {lineno}: `c` line has no target field"))
            })?;
            let b = value.parse::<u64>().map_err(|_| {
                CountError::InstanceFormat(format!("line {lineno}: invalid target `{value}`"))
            })?;
            targets.push(b);
        } else if first == "-----" {
            if !in_block {
                return Err(CountError::InstanceFormat(format!(
                    "line {lineno}: block terminator without an open coefficient block"
                )));
            }
            blocks.push(std::mem::take(&mut current));
            in_block = false;
        } else if first.starts_with("time") {
            in_block = true;
        } else if in_block {
            let sub = first.split(',').nth(2).ok_or_else(|| {
                CountError::InstanceFormat(format!(
                    "line {lineno}: coefficient line `{first}` has fewer than three sub-fields"
                ))
            })?;
            let coefficient = sub.parse::<u32>().map_err(|_| {
                CountError::InstanceFormat(format!("line {lineno}: invalid coefficient `{sub}`"))
            })?;
            current.push(coefficient);
        }
    }

    if in_block {
        return Err(CountError::InstanceFormat(
            "coefficient block not terminated by `-----` before end of input".into(),
        ));
    }
    if targets.len() != blocks.len() {
        return Err(CountError::InstanceFormat(format!(
            "found {} targets but {} coefficient blocks",
            targets.len(),
            blocks.len()
        )));
    }

    targets
        .into_iter()
        .zip(blocks)
        .enumerate()
        .map(|(i, (b, a))| Instance::new(a, b, format!("p{}", i + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_pisinger, Instance};
    use crate::error::CountError;

    const SAMPLE: &str = "\
knapPI_1_3_1000_1
n 3
c 61
z 100
time 0.00
1,94,45
2,10,12
3,31,4
-----


knapPI_1_3_1000_2
n 3
c 80
z 120
time 0.00
1,55,17
2,12,33
3,70,21
-----
";

    #[test]
    fn parses_two_instances_with_targets_and_coefficients() {
        let instances = parse_pisinger(SAMPLE).expect("sample should parse");
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].b, 61);
        assert_eq!(instances[0].a, vec![45, 12, 4]);
        assert_eq!(instances[0].name, "p1");
        assert_eq!(instances[1].b, 80);
        assert_eq!(instances[1].a, vec![17, 33, 21]);
    }

    #[test]
    fn missing_terminator_is_an_error() {
        let truncated = SAMPLE.rsplit_once("-----").map(|(head, _)| head).unwrap();
        let err = parse_pisinger(truncated).expect_err("unterminated block must fail");
        assert!(matches!(err, CountError::InstanceFormat(_)));
        assert!(format!("{err}").contains("not terminated"));
    }

    #[test]
    fn malformed_coefficient_line_is_an_error() {
        let broken = "c 10\ntime 0.00\n1,94\n-----\n";
        let err = parse_pisinger(broken).expect_err("short coefficient line must fail");
        assert!(format!("{err}").contains("sub-fields"));
    }

    #[test]
    fn target_block_count_mismatch_is_an_error() {
        let extra_target = "c 10\nc 20\ntime 0.00\n1,94,45\n-----\n";
        let err = parse_pisinger(extra_target).expect_err("mismatched counts must fail");
        assert!(format!("{err}").contains("2 targets"));
    }

    #[test]
    fn validation_rejects_degenerate_instances() {
        assert!(Instance::new(vec![], 5, "empty").is_err());
        assert!(Instance::new(vec![1, 0], 5, "zero coefficient").is_err());
        assert!(Instance::new(vec![1], 0, "zero target").is_err());
        assert!(Instance::new(vec![2, 3], 7, "ok").is_ok());
    }
}
