use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use pendulum_dsp::{
    control::{channel, ControlKind},
    dsp::PendulumParams,
    engine::{telemetry, RenderEngine},
    MAX_BLOCK_SIZE,
};

thread_local! {
    static ALLOC_COUNT: Cell<usize> = const { Cell::new(0) };
}

struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOC_COUNT.with(|c| c.set(c.get() + 1));
        unsafe { System.alloc(layout) }
    }
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static A: CountingAllocator = CountingAllocator;

#[test]
fn render_block_does_not_allocate() {
    let (tx, rx) = channel(PendulumParams::default());
    let (tap, _tap_rx) = telemetry(MAX_BLOCK_SIZE);
    let mut engine = RenderEngine::new(rx).with_telemetry(tap);
    let mut mono = vec![0i16; 512];
    let mut stereo = vec![0.0f32; 1024];

    let before = ALLOC_COUNT.with(|c| c.get());
    for i in 0..10_000 {
        if i % 100 == 0 {
            tx.set_parameter(ControlKind::NaturalFrequency, 2.0);
            tx.trigger_impulse();
        }
        engine.render_block(mono.as_mut_slice());
        engine.render_interleaved(stereo.as_mut_slice(), 2);
    }
    let after = ALLOC_COUNT.with(|c| c.get());

    assert_eq!(after, before, "render path should not allocate");
}
