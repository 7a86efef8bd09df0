pub mod doctor;
pub mod patch;
pub mod scaffold;
