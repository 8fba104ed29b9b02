use dioxus::prelude::*;

/// Trailing debounce over a signal value.
///
/// Returns a signal that follows `source` but only updates once `source`
/// has been stable for `delay_ms`. Each change bumps a generation counter;
/// a timer that wakes up to a stale generation does nothing, so only the
/// last change within the window fires.
pub fn use_debounced_value(source: Signal<String>, delay_ms: u32) -> Signal<String> {
    let mut debounced = use_signal(|| source.peek().clone());
    let mut generation = use_signal(|| 0u64);

    use_effect(move || {
        let value = source();
        // Write without reading so the effect does not subscribe to itself
        let my_generation = {
            let mut current = generation.write();
            *current += 1;
            *current
        };

        spawn(async move {
            sleep_ms(delay_ms).await;
            if *generation.peek() == my_generation {
                debounced.set(value);
            }
        });
    });

    debounced
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(ms as u64)).await;
}

#[cfg(test)]
mod tests {
    /// The generation check, without signals: a timer only wins when no
    /// newer change arrived while it slept.
    #[test]
    fn test_only_latest_generation_fires() {
        let mut generation = 0u64;
        let mut fired = Vec::new();

        // Three rapid changes; each captures its own generation
        let pending: Vec<u64> = (0..3)
            .map(|_| {
                generation += 1;
                generation
            })
            .collect();

        for my_generation in pending {
            if generation == my_generation {
                fired.push(my_generation);
            }
        }

        assert_eq!(fired, vec![3]);
    }
}
