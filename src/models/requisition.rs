use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle status of a requisition. Stored in the database as the
/// snake_case Portuguese wire string (e.g. "em_separacao").
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequisitionStatus {
    Pendente,
    Aprovada,
    EmSeparacao,
    Separado,
    EmEntrega,
    Entregue,
    Cancelada,
}

impl RequisitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequisitionStatus::Pendente => "pendente",
            RequisitionStatus::Aprovada => "aprovada",
            RequisitionStatus::EmSeparacao => "em_separacao",
            RequisitionStatus::Separado => "separado",
            RequisitionStatus::EmEntrega => "em_entrega",
            RequisitionStatus::Entregue => "entregue",
            RequisitionStatus::Cancelada => "cancelada",
        }
    }
}

/// Per-item status within a requisition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pendente,
    Separado,
    Entregue,
    Parcial,
    EmFalta,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pendente => "pendente",
            ItemStatus::Separado => "separado",
            ItemStatus::Entregue => "entregue",
            ItemStatus::Parcial => "parcial",
            ItemStatus::EmFalta => "em_falta",
        }
    }

    /// An item in this state requires no further delivery work.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ItemStatus::Entregue | ItemStatus::EmFalta)
    }
}

/// Expected delivery window for a requisition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Manha,
    Tarde,
    Noite,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Manha => "manha",
            Shift::Tarde => "tarde",
            Shift::Noite => "noite",
        }
    }
}

/// Kind of stock movement recorded in the ledger.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Entrada,
    Saida,
    Ajuste,
    Separacao,
    Entrega,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entrada => "entrada",
            MovementKind::Saida => "saida",
            MovementKind::Ajuste => "ajuste",
            MovementKind::Separacao => "separacao",
            MovementKind::Entrega => "entrega",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn requisition_status_round_trips_through_wire_strings() {
        for status in [
            RequisitionStatus::Pendente,
            RequisitionStatus::Aprovada,
            RequisitionStatus::EmSeparacao,
            RequisitionStatus::Separado,
            RequisitionStatus::EmEntrega,
            RequisitionStatus::Entregue,
            RequisitionStatus::Cancelada,
        ] {
            let parsed = RequisitionStatus::from_str(status.as_str()).expect("wire string parses");
            assert_eq!(parsed, status);
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn item_status_resolution() {
        assert!(ItemStatus::Entregue.is_resolved());
        assert!(ItemStatus::EmFalta.is_resolved());
        assert!(!ItemStatus::Pendente.is_resolved());
        assert!(!ItemStatus::Separado.is_resolved());
        assert!(!ItemStatus::Parcial.is_resolved());
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        assert!(RequisitionStatus::from_str("despachada").is_err());
        assert!(ItemStatus::from_str("").is_err());
    }
}
