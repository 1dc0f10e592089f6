pub mod cards;
pub mod columns;
