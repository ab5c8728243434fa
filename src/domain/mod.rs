// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Business rules that sit between the HTTP surface and the data store:
// email uniqueness on create, existence checks before update/delete, and
// whole-record replacement on update.
//
// ============================================================================

pub mod customer;
