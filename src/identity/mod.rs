//! Identity collaborators: login code check, face verification gate, and the
//! persisted sign-in session.

mod session;
mod verification;

pub use session::SessionManager;
pub use verification::{
    CodeVerifier, FaceVerifier, SimulatedFaceVerifier, StaticCodeVerifier,
};
