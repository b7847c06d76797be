use futures::{executor::block_on, FutureExt};
use hexlay_sdk::{
    AdCallbacks, AdType, ErrorCode, InitState, InviteParams, LoadCallback,
    LocalBackend, LocalConfig, LocalSdk, PlatformSdk, SdkBackend, SdkConfig,
    SdkEnvironment, SdkError, VendorError,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// A backend that holds on to the load callback until the test says so, so
/// we can observe everything that happens while the SDK is loading
#[derive(Default)]
struct ManualBackend {
    inner: LocalBackend,
    pending: RefCell<Option<LoadCallback<LocalSdk>>>,
    loads: Cell<u32>,
}

impl ManualBackend {
    fn finish(&self, config: &SdkConfig) {
        let callback =
            self.pending.borrow_mut().take().expect("No load pending");
        self.inner.load(config, callback);
    }

    fn fail(&self) {
        let callback =
            self.pending.borrow_mut().take().expect("No load pending");
        callback(Err(VendorError::new(ErrorCode::InitFailed, "nope").into()));
    }
}

impl SdkBackend for ManualBackend {
    type Sdk = LocalSdk;

    fn is_supported_platform(&self) -> bool {
        true
    }

    fn load(&self, _config: &SdkConfig, on_complete: LoadCallback<LocalSdk>) {
        self.loads.set(self.loads.get() + 1);
        *self.pending.borrow_mut() = Some(on_complete);
    }
}

#[test]
fn test_concurrent_init_loads_once() {
    let sdk = PlatformSdk::new(ManualBackend::default(), SdkConfig::default())
        .unwrap();
    assert_eq!(sdk.state(), InitState::Uninitialized);

    let mut waiters: Vec<_> = (0..3).map(|_| sdk.init().unwrap()).collect();
    assert_eq!(sdk.backend().loads.get(), 1);
    assert_eq!(sdk.state(), InitState::Requested);
    for waiter in &mut waiters {
        assert!(waiter.now_or_never().is_none());
    }
    assert!(matches!(sdk.game(), Err(SdkError::NotInitialized)));

    sdk.backend().finish(sdk.config());
    assert_eq!(sdk.state(), InitState::Initialized);
    for waiter in waiters {
        assert!(matches!(waiter.now_or_never(), Some(Ok(()))));
    }
    assert_eq!(sdk.environment().unwrap(), SdkEnvironment::Local);

    // Already loaded, resolves right away without loading again
    assert!(matches!(sdk.init().unwrap().now_or_never(), Some(Ok(()))));
    assert_eq!(sdk.backend().loads.get(), 1);
}

#[test]
fn test_failed_load_leaves_waiters_pending() {
    let sdk = PlatformSdk::new(ManualBackend::default(), SdkConfig::default())
        .unwrap();
    let mut waiter = sdk.init().unwrap();
    sdk.backend().fail();

    assert_eq!(sdk.state(), InitState::Requested);
    assert!((&mut waiter).now_or_never().is_none());
    assert!(matches!(sdk.user(), Err(SdkError::NotInitialized)));

    // Later callers queue up too, but no second load is attempted
    let mut late = sdk.init().unwrap();
    assert!((&mut late).now_or_never().is_none());
    assert_eq!(sdk.backend().loads.get(), 1);
}

#[test]
fn test_facade_dropped_while_loading() {
    let sdk = PlatformSdk::new(ManualBackend::default(), SdkConfig::default())
        .unwrap();
    let waiter = sdk.init().unwrap();
    drop(sdk);
    assert!(matches!(
        waiter.now_or_never(),
        Some(Err(SdkError::NotInitialized))
    ));
}

#[test]
fn test_unsupported_platform() {
    let backend = LocalBackend::new(LocalConfig {
        disabled: true,
        ..Default::default()
    });
    let sdk = PlatformSdk::new(backend, SdkConfig::default()).unwrap();
    assert!(!sdk.is_supported_platform());
    assert!(matches!(sdk.init(), Err(SdkError::Disabled)));
    assert_eq!(sdk.state(), InitState::Uninitialized);
}

#[test]
fn test_invalid_config() {
    let config = SdkConfig {
        script_url: "ftp://example.com/sdk.js".into(),
        ..Default::default()
    };
    let error = PlatformSdk::new(LocalBackend::default(), config).unwrap_err();
    assert!(matches!(error, SdkError::InvalidConfig(_)));
    assert_eq!(error.code(), ErrorCode::InitFailed);
}

#[test]
fn test_local_end_to_end() {
    let sdk = PlatformSdk::new(LocalBackend::default(), SdkConfig::default())
        .unwrap();
    block_on(sdk.init().unwrap()).unwrap();
    assert!(!sdk.is_qa_tool().unwrap());

    // Ads
    let finished = Rc::new(Cell::new(false));
    sdk.ad().unwrap().request_ad(
        AdType::Midgame,
        AdCallbacks::default().on_finished({
            let finished = Rc::clone(&finished);
            move || finished.set(true)
        }),
    );
    assert!(finished.get());
    assert!(!block_on(sdk.ad().unwrap().has_adblock()).unwrap());

    // Invite links
    let mut params = InviteParams::new();
    params.insert("roomId".into(), "123".into());
    assert_eq!(
        sdk.game().unwrap().invite_link(&params).unwrap(),
        "http://localhost:8080/?roomId=123"
    );

    // Log in, which should also notify listeners
    let user = sdk.user().unwrap();
    assert_eq!(block_on(user.get_user()).unwrap(), None);
    let seen = Rc::new(RefCell::new(Vec::new()));
    user.add_auth_listener(Box::new({
        let seen = Rc::clone(&seen);
        move |user: Option<&hexlay_sdk::PortalUser>| {
            seen.borrow_mut().push(user.map(|user| user.username.clone()))
        }
    }));
    let logged_in = block_on(user.show_auth_prompt()).unwrap().unwrap();
    assert_eq!(logged_in.username, "local_player");
    assert_eq!(*seen.borrow(), vec![Some("local_player".to_owned())]);

    // Storage
    let data = sdk.data().unwrap();
    data.set_item("level", "3").unwrap();
    assert_eq!(data.get_item("level").unwrap().as_deref(), Some("3"));
}
