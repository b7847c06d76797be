use crate::{
    gate::{InitGate, InitState, InitWaiter},
    module::{
        AdModule, BannerModule, DataModule, GameModule, LoadedSdk, UserModule,
    },
    SdkConfig, SdkEnvironment, SdkError,
};
use log::{debug, error, info, warn};
use std::{
    cell::{OnceCell, RefCell},
    rc::Rc,
};
use validator::Validate;

/// Called by a backend exactly once, when loading finishes (or fails)
pub type LoadCallback<S> = Box<dyn FnOnce(Result<S, SdkError>)>;

/// Knows how to get a [LoadedSdk] from somewhere
pub trait SdkBackend {
    type Sdk: LoadedSdk;

    /// Can the SDK run here at all? If not, [PlatformSdk::init] fails
    /// immediately.
    fn is_supported_platform(&self) -> bool;

    /// Start loading the SDK. `on_complete` may be called synchronously, or
    /// at any point later. It may also never be called, if the load hangs.
    fn load(&self, config: &SdkConfig, on_complete: LoadCallback<Self::Sdk>);
}

/// Shared handle to the facade. Create one at startup and pass it to whatever
/// needs the SDK.
pub type SdkHandle<B> = Rc<PlatformSdk<B>>;

/// The one entry point to the portal SDK. Wraps a [SdkBackend] and guarantees
/// it gets loaded at most once, no matter how many places ask for it.
///
/// ```
/// use futures::executor::block_on;
/// use hexlay_sdk::{LocalBackend, PlatformSdk, SdkConfig, SdkEnvironment};
///
/// let sdk = PlatformSdk::new(LocalBackend::default(), SdkConfig::default())
///     .unwrap();
/// block_on(async {
///     sdk.init()?.await?;
///     assert_eq!(sdk.environment()?, SdkEnvironment::Local);
///     Ok::<_, hexlay_sdk::SdkError>(())
/// })
/// .unwrap();
/// ```
pub struct PlatformSdk<B: SdkBackend> {
    backend: B,
    config: SdkConfig,
    gate: RefCell<InitGate>,
    sdk: OnceCell<B::Sdk>,
}

impl<B: SdkBackend + 'static> PlatformSdk<B> {
    /// Create the facade. Nothing is loaded until [Self::init] is called.
    /// Returns an error if the config is invalid.
    pub fn new(
        backend: B,
        config: SdkConfig,
    ) -> Result<SdkHandle<B>, SdkError> {
        config.validate()?;
        Ok(Rc::new(Self {
            backend,
            config,
            gate: RefCell::new(InitGate::new()),
            sdk: OnceCell::new(),
        }))
    }

    /// True if the SDK is enabled on this platform. If it's not, every other
    /// call will fail.
    pub fn is_supported_platform(&self) -> bool {
        self.backend.is_supported_platform()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> InitState {
        self.gate.borrow().state()
    }

    /// Initialize the SDK. Await the returned future before using anything
    /// else. This can be called from as many places as you want: the first
    /// call starts loading, and everyone resolves together once it's done.
    /// Calls after that resolve immediately.
    ///
    /// Fails immediately with [SdkError::Disabled] on unsupported platforms.
    /// If loading fails, the error is logged and the returned futures never
    /// resolve.
    pub fn init(self: &Rc<Self>) -> Result<InitWaiter, SdkError> {
        if !self.is_supported_platform() {
            return Err(SdkError::Disabled);
        }

        // Don't hold the borrow while loading, the backend may call back
        // synchronously
        let subscription = self.gate.borrow_mut().subscribe();
        if subscription.start_load {
            self.start_load();
        } else {
            debug!("SDK init already requested, waiting");
        }
        Ok(subscription.waiter)
    }

    fn start_load(self: &Rc<Self>) {
        info!("Loading SDK from {}", self.config.script_url);
        let facade = Rc::downgrade(self);
        self.backend.load(
            &self.config,
            Box::new(move |result| match facade.upgrade() {
                Some(facade) => facade.complete_load(result),
                None => warn!("SDK finished loading after it was dropped"),
            }),
        );
    }

    fn complete_load(&self, result: Result<B::Sdk, SdkError>) {
        match result {
            Ok(sdk) => {
                if self.sdk.set(sdk).is_err() {
                    warn!("SDK completed loading twice, ignoring");
                    return;
                }
                let released = self.gate.borrow_mut().open();
                info!("SDK initialized, released {} waiter(s)", released);
            }
            // TODO decide whether a failed load should reject waiters and
            // allow another init() to retry
            Err(err) => {
                error!("Failed to load SDK: {}", err);
                self.gate.borrow_mut().fail();
            }
        }
    }

    /// Get the loaded SDK, in its concrete type
    pub fn sdk(&self) -> Result<&B::Sdk, SdkError> {
        self.sdk.get().ok_or(SdkError::NotInitialized)
    }

    pub fn environment(&self) -> Result<SdkEnvironment, SdkError> {
        Ok(self.sdk()?.environment())
    }

    pub fn is_qa_tool(&self) -> Result<bool, SdkError> {
        Ok(self.sdk()?.is_qa_tool())
    }

    pub fn ad(&self) -> Result<&dyn AdModule, SdkError> {
        Ok(self.sdk()?.ad())
    }

    pub fn game(&self) -> Result<&dyn GameModule, SdkError> {
        Ok(self.sdk()?.game())
    }

    pub fn user(&self) -> Result<&dyn UserModule, SdkError> {
        Ok(self.sdk()?.user())
    }

    pub fn data(&self) -> Result<&dyn DataModule, SdkError> {
        Ok(self.sdk()?.data())
    }

    pub fn banner(&self) -> Result<&dyn BannerModule, SdkError> {
        Ok(self.sdk()?.banner())
    }
}

impl<B: SdkBackend> std::fmt::Debug for PlatformSdk<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformSdk")
            .field("config", &self.config)
            .field("gate", &self.gate)
            .field("loaded", &self.sdk.get().is_some())
            .finish()
    }
}
