use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use smoothscroll_core::scroll::{
    drive, Clock, Interaction, MemoryViewport, ScrollAnimator, TokioClock, Viewport,
};
use smoothscroll_core::ScrollConfig;

/// Viewport that prints every write with its time since the start
struct PrintingViewport {
    inner: MemoryViewport,
    clock: TokioClock,
}

impl Viewport for PrintingViewport {
    fn scroll_x(&self) -> f64 {
        self.inner.scroll_x()
    }

    fn scroll_y(&self) -> f64 {
        self.inner.scroll_y()
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        println!("{:>8.1} ms  y = {:>10.2}", self.clock.now_ms(), y);
        self.inner.scroll_to(x, y);
    }
}

pub async fn run(from: f64, target: f64, max_duration_ms: f64, wheel_at: Option<u64>) -> Result<()> {
    ScrollConfig {
        enabled: true,
        max_duration_ms,
    }
    .validate()?;

    let clock = TokioClock::new();
    let mut animator = ScrollAnimator::with_clock(max_duration_ms, clock);
    let mut viewport = PrintingViewport {
        inner: MemoryViewport::new(0.0, from),
        clock,
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    if let Some(at) = wheel_at {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(at)).await;
            println!("{:>8.1} ms  wheel", clock.now_ms());
            let _ = tx.send(Interaction::Wheel);
        });
    } else {
        drop(tx);
    }

    info!(from, target, max_duration_ms, "Simulating scroll");
    println!(
        "Scrolling {} -> {} (max {} ms, timeout {} ms)",
        from,
        target,
        max_duration_ms,
        animator.timeout_ms()
    );
    animator.scroll_to_target(&mut viewport, target);
    if let Some(run) = animator.current_run() {
        println!("Animation duration: {:.1} ms", run.duration_ms);
    }

    let report = drive(&mut animator, &mut viewport, &mut rx).await;

    println!();
    println!("Steps:        {}", report.steps + 1);
    println!(
        "Stopped:      {}",
        report
            .stop
            .map(|r| format!("{:?}", r))
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Final offset: {:.2}", report.final_offset);

    Ok(())
}
