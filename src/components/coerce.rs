//! Hulpfuncties voor het converteren van `Value`-types.

use crate::core::{Aggregation, Part};

use super::ComponentError;
use super::value::Value;

pub fn coerce_number(value: &Value) -> Result<f64, ComponentError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.parse().map_err(|_| {
            ComponentError::new(format!("Kon tekst '{}' niet naar een getal converteren", s))
        }),
        Value::List(l) if l.len() == 1 => coerce_number(&l[0]),
        other => Err(ComponentError::new(format!(
            "Verwachtte een getal, kreeg {}",
            other.kind()
        ))),
    }
}

pub fn coerce_integer(value: &Value) -> Result<i64, ComponentError> {
    match value {
        Value::Number(n) => Ok(n.round() as i64),
        Value::Boolean(b) => Ok(i64::from(*b)),
        Value::List(l) if l.len() == 1 => coerce_integer(&l[0]),
        other => Err(ComponentError::new(format!(
            "Verwachtte een geheel getal, kreeg {}",
            other.kind()
        ))),
    }
}

pub fn coerce_boolean(value: &Value) -> Result<bool, ComponentError> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Number(n) => Ok(n.abs() > 1e-9),
        Value::List(l) if l.len() == 1 => coerce_boolean(&l[0]),
        other => Err(ComponentError::new(format!(
            "Verwachtte een booleaanse waarde, kreeg {}",
            other.kind()
        ))),
    }
}

/// Niet-aangesloten of lege invoer valt terug op `true`, de standaard
/// van de optionele togglepinnen.
pub fn coerce_boolean_with_default(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Null) | None => true,
        Some(v) => coerce_boolean(v).unwrap_or(true),
    }
}

pub fn coerce_part(value: &Value) -> Result<Part, ComponentError> {
    match value {
        Value::Part(part) => Ok(part.clone()),
        Value::List(l) if l.len() == 1 => coerce_part(&l[0]),
        other => Err(ComponentError::new(format!(
            "Verwachtte een part, kreeg {}",
            other.kind()
        ))),
    }
}

/// Accepteert een volledige aggregatie of een losse lijst van parts.
pub fn coerce_aggregation(value: &Value) -> Result<Aggregation, ComponentError> {
    match value {
        Value::Aggregation(aggregation) => Ok(aggregation.clone()),
        Value::List(l) if l.len() == 1 && matches!(l[0], Value::Aggregation(_)) => {
            coerce_aggregation(&l[0])
        }
        Value::List(_) => {
            let mut parts = Vec::new();
            push_parts(value, &mut parts)?;
            Ok(Aggregation::from_parts(parts))
        }
        other => Err(ComponentError::new(format!(
            "Verwachtte een aggregatie, kreeg {}",
            other.kind()
        ))),
    }
}

/// Verzamelt parts uit een (mogelijk geneste) lijstwaarde. Ontbrekende
/// of lege invoer levert een lege lijst op.
pub fn collect_parts(value: Option<&Value>) -> Result<Vec<Part>, ComponentError> {
    let mut parts = Vec::new();
    match value {
        Some(Value::Null) | None => {}
        Some(v) => push_parts(v, &mut parts)?,
    }
    Ok(parts)
}

fn push_parts(value: &Value, parts: &mut Vec<Part>) -> Result<(), ComponentError> {
    match value {
        Value::Part(part) => {
            parts.push(part.clone());
            Ok(())
        }
        Value::List(values) => {
            for entry in values {
                push_parts(entry, parts)?;
            }
            Ok(())
        }
        Value::Null => Ok(()),
        other => Err(ComponentError::new(format!(
            "Verwachtte een part, kreeg {}",
            other.kind()
        ))),
    }
}

/// Verzamelt niet-negatieve aantallen uit een lijstwaarde. Ontbrekende
/// of lege invoer levert een lege lijst op.
pub fn collect_amounts(value: Option<&Value>) -> Result<Vec<usize>, ComponentError> {
    let values = match value {
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(Value::List(values)) => values.as_slice(),
        Some(single) => std::slice::from_ref(single),
    };

    let mut amounts = Vec::with_capacity(values.len());
    for entry in values {
        let amount = coerce_integer(entry)?;
        let amount = usize::try_from(amount).map_err(|_| {
            ComponentError::new(format!("Aantallen moeten niet-negatief zijn, kreeg {amount}"))
        })?;
        amounts.push(amount);
    }
    Ok(amounts)
}

#[cfg(test)]
mod tests {
    use super::{
        coerce_aggregation, coerce_boolean_with_default, coerce_number, collect_amounts,
        collect_parts,
    };
    use crate::components::value::Value;
    use crate::core::Part;
    use crate::geom::Point3;

    fn part(id: usize) -> Part {
        Part::new(id, "p", Point3::ORIGIN, 1.0, Vec::new())
    }

    #[test]
    fn numbers_coerce_from_text_and_booleans() {
        assert_eq!(coerce_number(&Value::Text("2.5".to_owned())).unwrap(), 2.5);
        assert_eq!(coerce_number(&Value::Boolean(true)).unwrap(), 1.0);
        assert!(coerce_number(&Value::Null).is_err());
    }

    #[test]
    fn missing_toggle_falls_back_to_true() {
        assert!(coerce_boolean_with_default(None));
        assert!(coerce_boolean_with_default(Some(&Value::Null)));
        assert!(!coerce_boolean_with_default(Some(&Value::Boolean(false))));
    }

    #[test]
    fn nested_part_lists_are_flattened() {
        let value = Value::List(vec![
            Value::Part(part(0)),
            Value::List(vec![Value::Part(part(1)), Value::Part(part(2))]),
        ]);
        let parts = collect_parts(Some(&value)).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].id, 2);
    }

    #[test]
    fn a_part_list_coerces_to_an_aggregation() {
        let value = Value::List(vec![Value::Part(part(0)), Value::Part(part(1))]);
        let aggregation = coerce_aggregation(&value).unwrap();
        assert_eq!(aggregation.part_count(), 2);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let value = Value::List(vec![Value::Number(2.0), Value::Number(-1.0)]);
        assert!(collect_amounts(Some(&value)).is_err());

        let value = Value::List(vec![Value::Number(2.0), Value::Number(3.0)]);
        assert_eq!(collect_amounts(Some(&value)).unwrap(), vec![2, 3]);
    }
}
