//! Live server rig for the character endpoint scenarios.
//!
//! Actix spawns onto a `LocalSet`, so the rig owns a current-thread runtime
//! and drives every request through `LocalSet::block_on`. Dropping the
//! [`WorldFixture`] stops the server, including after a failed assertion.

use std::cell::RefCell;
use std::future::Future;
use std::net::TcpListener;
use std::num::NonZeroUsize;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use awc::Client;
use characters::Trace;
use characters::domain::{CharacterLookupService, TRACE_ID_HEADER};
use characters::inbound::http::configure;
use characters::inbound::http::health::HealthState;
use characters::inbound::http::state::HttpState;
use characters::outbound::cache::InMemoryCharacterCache;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use crate::doubles::CountingCharacterRepository;

const CACHE_CAPACITY: usize = 64;
const CACHE_TTL: Duration = Duration::from_secs(60);

struct ServerRig {
    runtime: Runtime,
    local: LocalSet,
    handle: ServerHandle,
    base_url: String,
}

impl ServerRig {
    fn start(store: CountingCharacterRepository) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let (base_url, handle) = local
            .block_on(&runtime, spawn_server(store))
            .expect("server should start");
        Self {
            runtime,
            local,
            handle,
            base_url,
        }
    }

    fn run<F: Future>(&self, fut: F) -> F::Output {
        self.local.block_on(&self.runtime, fut)
    }
}

/// One HTTP exchange as seen by the client.
#[derive(Debug, Clone)]
pub(crate) struct Observation {
    pub(crate) path: String,
    pub(crate) status: u16,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
}

pub(crate) struct CharacterWorld {
    rig: ServerRig,
    pub(crate) store: CountingCharacterRepository,
    pub(crate) previous: Option<Observation>,
    pub(crate) last: Option<Observation>,
}

impl CharacterWorld {
    pub(crate) fn last(&self) -> &Observation {
        self.last.as_ref().expect("a request was made")
    }
}

pub(crate) struct WorldFixture {
    world: Rc<RefCell<CharacterWorld>>,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> Rc<RefCell<CharacterWorld>> {
        Rc::clone(&self.world)
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let handle = ctx.rig.handle.clone();
        ctx.rig.run(async move { handle.stop(true).await });
    }
}

async fn spawn_server(store: CountingCharacterRepository) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let capacity = NonZeroUsize::new(CACHE_CAPACITY).ok_or("capacity must be non-zero")?;
    let cache = InMemoryCharacterCache::new(capacity, CACHE_TTL);
    let lookup = CharacterLookupService::new(Arc::new(store), Arc::new(cache));
    let http_state = web::Data::new(HttpState::new(Arc::new(lookup)));
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_state.clone())
            .app_data(health.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

async fn fetch(url: String, path: String) -> Observation {
    let mut response = Client::default()
        .get(url)
        .send()
        .await
        .expect("request");
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = response.body().await.expect("body");
    Observation {
        path,
        status: response.status().as_u16(),
        trace_id,
        body: serde_json::from_slice(&bytes).expect("json body"),
    }
}

/// GET `path` and make the response the latest observation.
pub(crate) fn perform_get(world: &RefCell<CharacterWorld>, path: &str) {
    let observation = {
        let ctx = world.borrow();
        let url = format!("{}{path}", ctx.rig.base_url);
        ctx.rig.run(fetch(url, path.to_owned()))
    };
    let mut ctx = world.borrow_mut();
    let earlier = ctx.last.replace(observation);
    ctx.previous = earlier;
}

/// Start a server over an empty counting store.
pub(crate) fn world() -> WorldFixture {
    let store = CountingCharacterRepository::default();
    let rig = ServerRig::start(store.clone());
    WorldFixture {
        world: Rc::new(RefCell::new(CharacterWorld {
            rig,
            store,
            previous: None,
            last: None,
        })),
    }
}
