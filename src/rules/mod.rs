pub mod castle;
pub mod check;
pub mod mobility;
