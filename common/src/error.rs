//! # Error Taxonomy
//!
//! Every failure the core can report. All of them are terminal for the
//! operation that raised them: nothing is retried internally.
//!
//! Messages are shown to end users as-is, which is why they are written in
//! Spanish like the rest of the catalog front-end.

use thiserror::Error;

use crate::models::book::BookId;
use crate::models::reservation::{ReservationId, ReservationStatus};
use crate::models::user::UserId;

/// Failure reported by an outbound port (storage, catalog, user directory).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Repositorio no disponible: {0}")]
    Unavailable(String),
    #[error("Conflicto al guardar: {0}")]
    Conflict(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("El usuario {0} no existe")]
    UserNotFound(UserId),

    #[error("El libro {0} no existe")]
    BookNotFound(BookId),

    #[error("El libro está agotado")]
    OutOfStock,

    #[error("Duración de alquiler inválida: {0} días")]
    InvalidDuration(i64),

    #[error("El importe excede el máximo representable")]
    FeeOverflow,

    #[error("La reserva {id} no está activa (estado: {status})")]
    InvalidState {
        id: ReservationId,
        status: ReservationStatus,
    },

    #[error("La reserva {0} no existe")]
    ReservationNotFound(ReservationId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
