use super::distribution::Repertoire;
use crate::Probability;
use serde_json::Value;

/// Nested JSON arrays read in row-major order:
/// the outermost array is axis 0, so `[[a, b], [c, d]]`
/// holds `a` at (0, 0), `b` at (0, 1), `c` at (1, 0).
///
/// A flat array of numbers is read as mass over 2^N states,
/// node 0 fastest, which is also how a single-node array reads.
impl TryFrom<&Value> for Repertoire {
    type Error = anyhow::Error;
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let shape = shape(value)?;
        let stride = shape
            .iter()
            .scan(1usize, |acc, &s| {
                let stride = *acc;
                *acc *= s;
                Some(stride)
            })
            .collect::<Vec<_>>();
        let mut mass = vec![0.; shape.iter().product()];
        fill(value, &shape, &stride, 0, 0, &mut mass)?;
        Repertoire::new(shape, mass)
    }
}

impl TryFrom<&str> for Repertoire {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let value = serde_json::from_str::<Value>(s.trim())?;
        Repertoire::try_from(&value)
    }
}

/// axis lengths, read off the first element at each depth
fn shape(value: &Value) -> anyhow::Result<Vec<usize>> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        cursor = items
            .first()
            .ok_or_else(|| anyhow::anyhow!("empty axis in repertoire"))?;
    }
    match shape.as_slice() {
        [] => Ok(shape),
        // flat array over 2^N states
        [n] if *n > 2 => {
            if !n.is_power_of_two() {
                anyhow::bail!("{} states is not a power of two", n);
            }
            Ok(vec![2; n.trailing_zeros() as usize])
        }
        _ => Ok(shape),
    }
}

fn fill(
    value: &Value,
    shape: &[usize],
    stride: &[usize],
    depth: usize,
    offset: usize,
    mass: &mut [Probability],
) -> anyhow::Result<()> {
    match value {
        Value::Number(_) if depth != shape.len() => {
            Err(anyhow::anyhow!("ragged repertoire at depth {}", depth))
        }
        Value::Number(n) => {
            let p = n
                .as_f64()
                .ok_or_else(|| anyhow::anyhow!("unrepresentable number {}", n))?;
            mass[offset] = p;
            Ok(())
        }
        // flat array spanning every remaining axis at once
        Value::Array(items)
            if depth == 0
                && shape.len() > 1
                && items.len() == mass.len()
                && items.iter().all(Value::is_number) =>
        {
            items
                .iter()
                .enumerate()
                .try_for_each(|(i, item)| fill(item, shape, stride, shape.len(), i, mass))
        }
        Value::Array(items) => {
            if depth >= shape.len() || items.len() != shape[depth] {
                anyhow::bail!("ragged repertoire at depth {}", depth);
            }
            items.iter().enumerate().try_for_each(|(i, item)| {
                fill(item, shape, stride, depth + 1, offset + i * stride[depth], mass)
            })
        }
        other => Err(anyhow::anyhow!("expected probability, got {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_arrays_are_axis_zero_outermost() {
        let r = Repertoire::try_from("[[0.1, 0.2], [0.3, 0.4]]").unwrap();
        assert_eq!(r.shape(), &[2, 2]);
        // (0,0) (1,0) (0,1) (1,1)
        assert_eq!(r.flatten(), &[0.1, 0.3, 0.2, 0.4]);
    }

    #[test]
    fn flat_arrays_are_node_zero_fastest() {
        let r = Repertoire::try_from("[0.1, 0.2, 0.3, 0.4]").unwrap();
        assert_eq!(r.shape(), &[2, 2]);
        assert_eq!(r.flatten(), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn singleton_axes_survive_parsing() {
        let r = Repertoire::try_from("[[[0.25], [0.25]], [[0.25], [0.25]]]").unwrap();
        assert_eq!(r.shape(), &[2, 2, 1]);
        assert_eq!(r.squeeze(), vec![2, 2]);
        let r = Repertoire::try_from("[[1.0]]").unwrap();
        assert_eq!(r.shape(), &[1, 1]);
        assert_eq!(r.nodes(), 0);
    }

    #[test]
    fn rejects_ragged_and_non_numeric() {
        assert!(Repertoire::try_from("[[0.5, 0.5], [1.0]]").is_err());
        assert!(Repertoire::try_from("[0.2, 0.3, 0.5]").is_err());
        assert!(Repertoire::try_from("[\"a\", \"b\"]").is_err());
        assert!(Repertoire::try_from("[]").is_err());
    }
}
