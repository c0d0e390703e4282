mod api_ext;
mod backend_error;
mod jobs_backend;
mod kubernetes_backend;

pub use self::{
    api_ext::OrchestratorApi, backend_error::BackendError, jobs_backend::JobsBackend,
    kubernetes_backend::KubernetesBackend,
};
