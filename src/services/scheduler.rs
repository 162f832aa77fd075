// ============================================================================
// SCHEDULER - Timers y tareas en el event loop (gloo-timers + spawn_local)
// ============================================================================

use futures::future::LocalBoxFuture;

pub trait Scheduler {
    /// Futuro que se resuelve tras `ms` milisegundos
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;

    /// Lanza una tarea en el event loop (sin esperar su resultado)
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

#[cfg(target_arch = "wasm32")]
pub use web::WebScheduler;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::Scheduler;
    use futures::future::LocalBoxFuture;
    use futures::FutureExt;
    use gloo_timers::future::TimeoutFuture;

    pub struct WebScheduler;

    impl Scheduler for WebScheduler {
        fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
            TimeoutFuture::new(ms).boxed_local()
        }

        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            wasm_bindgen_futures::spawn_local(task);
        }
    }
}
