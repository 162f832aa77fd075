// ============================================================================
// TESTING - Transport con respuestas guionizadas y scheduler con reloj virtual
// ============================================================================
// Todo corre sobre un `LocalPool` de un solo hilo.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use futures::FutureExt;

use crate::models::UserProfile;
use crate::services::scheduler::Scheduler;
use crate::services::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

pub use futures::executor::block_on;

pub const BASE_URL: &str = "http://shop.test";

#[derive(Clone)]
struct Scripted {
    status: u16,
    body: String,
    delay_ms: u32,
}

/// Transport guionizado. Las rutas son `METHOD path` sin el prefijo `/api/`
/// ni la query. La última respuesta de una ruta se repite; una ruta sin
/// guion falla como un host inalcanzable.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<String, VecDeque<Scripted>>>,
    requests: RefCell<Vec<ApiRequest>>,
    clock: RefCell<Option<Rc<ManualScheduler>>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_clock(clock: Rc<ManualScheduler>) -> Rc<Self> {
        let transport = Self::default();
        *transport.clock.borrow_mut() = Some(clock);
        Rc::new(transport)
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.respond_after(method, path, 0, status, body);
    }

    /// Respuesta entregada `delay_ms` de tiempo virtual después de la petición
    pub fn respond_after(&self, method: Method, path: &str, delay_ms: u32, status: u16, body: &str) {
        self.routes
            .borrow_mut()
            .entry(route_key(method, path))
            .or_default()
            .push_back(Scripted {
                status,
                body: body.to_string(),
                delay_ms,
            });
    }

    /// Fallo de transporte (status 0)
    pub fn fail(&self, method: Method, path: &str) {
        self.respond(method, path, 0, "");
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, method: Method, path: &str) -> usize {
        self.urls(method, path).len()
    }

    /// URLs completas enviadas a una ruta, en orden
    pub fn urls(&self, method: Method, path: &str) -> Vec<String> {
        let key = route_key(method, path);
        self.requests
            .borrow()
            .iter()
            .filter(|r| route_key(r.method, &r.url) == key)
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        let key = route_key(request.method, &request.url);
        self.requests.borrow_mut().push(request);

        let scripted = {
            let mut routes = self.routes.borrow_mut();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        let scripted = match scripted {
            Some(s) => s,
            None => return Err(format!("connection refused ({})", key)),
        };

        if scripted.delay_ms > 0 {
            let clock = self.clock.borrow().clone();
            let clock = clock.expect("delayed responses need MockTransport::with_clock");
            clock.sleep(scripted.delay_ms).await;
        }

        if scripted.status == 0 {
            return Err("connection reset".to_string());
        }
        Ok(ApiResponse {
            status: scripted.status,
            body: scripted.body,
        })
    }
}

fn route_key(method: Method, url_or_path: &str) -> String {
    let path = match url_or_path.find("/api/") {
        Some(idx) => &url_or_path[idx + "/api/".len()..],
        None => url_or_path.trim_start_matches('/'),
    };
    let path = path.split('?').next().unwrap_or(path);
    format!("{} {}", method.as_str(), path)
}

/// Reloj virtual: `sleep` registra un vencimiento, `fire_next` lo dispara
pub struct ManualScheduler {
    now: Cell<u64>,
    timers: RefCell<Vec<(u64, oneshot::Sender<()>)>>,
    spawner: LocalSpawner,
}

impl ManualScheduler {
    pub fn new(spawner: LocalSpawner) -> Rc<Self> {
        Rc::new(Self {
            now: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            spawner,
        })
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Avanza hasta el próximo vencimiento `<= until` y dispara los timers de
    /// ese instante. Sin vencimientos pendientes deja el reloj en `until`.
    pub fn fire_next(&self, until: u64) -> bool {
        let next = self
            .timers
            .borrow()
            .iter()
            .filter(|(_, tx)| !tx.is_canceled())
            .map(|(at, _)| *at)
            .filter(|at| *at <= until)
            .min();
        let at = match next {
            Some(at) => at,
            None => {
                self.now.set(until.max(self.now.get()));
                return false;
            }
        };
        self.now.set(at.max(self.now.get()));
        let due: Vec<oneshot::Sender<()>> = {
            let mut timers = self.timers.borrow_mut();
            let (due, pending): (Vec<_>, Vec<_>) = timers.drain(..).partition(|(deadline, _)| *deadline <= at);
            *timers = pending;
            due.into_iter().map(|(_, tx)| tx).collect()
        };
        for tx in due {
            let _ = tx.send(());
        }
        true
    }

    /// Timers que alguien sigue esperando
    pub fn live_timers(&self) -> usize {
        self.timers.borrow().iter().filter(|(_, tx)| !tx.is_canceled()).count()
    }
}

impl Scheduler for ManualScheduler {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        self.timers.borrow_mut().push((self.now.get() + u64::from(ms), tx));
        async move {
            let _ = rx.await;
        }
        .boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("spawn on LocalPool");
    }
}

/// Pool + reloj + transport conectados
pub struct Harness {
    pub pool: LocalPool,
    pub scheduler: Rc<ManualScheduler>,
    pub transport: Rc<MockTransport>,
}

impl Harness {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let scheduler = ManualScheduler::new(pool.spawner());
        let transport = MockTransport::with_clock(scheduler.clone());
        Self {
            pool,
            scheduler,
            transport,
        }
    }

    /// Lanza una tarea y guarda su resultado al terminar
    pub fn spawn<T: 'static>(&self, task: impl Future<Output = T> + 'static) -> Rc<RefCell<Option<T>>> {
        let slot = Rc::new(RefCell::new(None));
        let out = slot.clone();
        self.scheduler.spawn(
            async move {
                let value = task.await;
                *out.borrow_mut() = Some(value);
            }
            .boxed_local(),
        );
        slot
    }

    pub fn run(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Avanza el reloj virtual vencimiento a vencimiento, ejecutando el pool
    /// entre cada uno (un timer periódico dispara una vez por periodo)
    pub fn advance(&mut self, ms: u64) {
        self.run();
        let target = self.scheduler.now() + ms;
        while self.scheduler.fire_next(target) {
            self.run();
        }
    }

    /// Ejecuta un future que no espera al reloj virtual
    pub fn block_on<F: Future>(&mut self, future: F) -> F::Output {
        self.pool.run_until(future)
    }
}

pub fn user_json() -> &'static str {
    r#"{"id": 7, "email": "anna@example.com", "first_name": "Анна", "last_name": "Иванова", "patronymic": "", "phone": "+79990000000"}"#
}

pub fn user() -> UserProfile {
    serde_json::from_str(user_json()).expect("valid user json")
}

pub fn short_product_json(id: u64, price: &str) -> String {
    format!(
        r#"{{"id": {}, "title": "Товар {}", "price": "{}", "discount_price": null, "image": null}}"#,
        id, id, price
    )
}
