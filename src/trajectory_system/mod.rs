pub mod aerodynamics;
pub mod contact;
pub mod kinematics;
pub mod orbit;
