//! Individual ad screenshot capture: PNG file plus a JSON sidecar per ad.
//!
//! Three capture strategies, tried in order:
//! 1. Frame element screenshot, for iframe ads matched by URL.
//! 2. Direct element screenshot via locator.
//! 3. Crop the ad's region out of a full viewport screenshot.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use image::ImageReader;
use serde_json::json;
use viewpoint_core::Page;

use crate::config::AdCaptureSettings;
use crate::error::ObserverError;
use crate::models::{AdCapture, AdCaptureResult, AdElement, CaptureMethod};

/// Sanitize a string for safe use as a filename component.
fn safe_filename(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

/// Captures individual ad elements as PNG screenshots with metadata sidecars.
pub struct AdCapturer {
    config: AdCaptureSettings,
}

impl AdCapturer {
    #[must_use]
    pub fn new(config: AdCaptureSettings) -> Self {
        Self { config }
    }

    /// Screenshot each ad (up to `max_captures`) and write a metadata sidecar.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output directory cannot be created;
    /// individual capture failures are recorded as [`CaptureMethod::Failed`].
    pub async fn capture_ads(
        &self,
        page: &Page,
        ads: &[AdElement],
        run_id: &str,
        domain: &str,
        consent_mode: &str,
    ) -> Result<AdCaptureResult, ObserverError> {
        if !self.config.enabled || ads.is_empty() {
            return Ok(AdCaptureResult::default());
        }

        let base_dir = Path::new(&self.config.output_dir).join(run_id).join(safe_filename(domain));
        std::fs::create_dir_all(&base_dir)
            .map_err(|e| ObserverError::Page(format!("create ad capture dir: {e}")))?;

        let limit = ads.len().min(self.config.max_captures);
        let mut captures = Vec::with_capacity(limit);
        for (index, ad) in ads.iter().take(limit).enumerate() {
            captures.push(
                self.capture_single(page, ad, index, &base_dir, domain, consent_mode).await,
            );
        }

        let total_captured =
            captures.iter().filter(|c| c.capture_method != CaptureMethod::Failed).count();
        let total_failed =
            captures.iter().filter(|c| c.capture_method == CaptureMethod::Failed).count();

        Ok(AdCaptureResult { captures, total_captured, total_failed })
    }

    async fn capture_single(
        &self,
        page: &Page,
        ad: &AdElement,
        index: usize,
        base_dir: &Path,
        domain: &str,
        consent_mode: &str,
    ) -> AdCapture {
        let network = safe_filename(ad.ad_network.as_deref().unwrap_or("unknown"));
        let (w, h) = (ad.width as u32, ad.height as u32);
        let filename = format!(
            "{}__{}__ad_{:03}__{}__{}x{}",
            safe_filename(domain),
            consent_mode,
            index,
            network,
            w,
            h
        );
        let screenshot_path = base_dir.join(format!("{filename}.png"));
        let metadata_path = base_dir.join(format!("{filename}.json"));

        self.write_metadata(&metadata_path, ad, domain, consent_mode, &filename);

        if ad.is_iframe && ad.iframe_src.is_some() {
            if self.try_frame_element_screenshot(page, ad, &screenshot_path).await {
                return AdCapture {
                    ad_index: index,
                    screenshot_path: Some(screenshot_path.display().to_string()),
                    metadata_path: Some(metadata_path.display().to_string()),
                    width: w,
                    height: h,
                    capture_method: CaptureMethod::FrameElement,
                };
            }
        }

        if self.try_element_screenshot(page, ad, &screenshot_path).await {
            return AdCapture {
                ad_index: index,
                screenshot_path: Some(screenshot_path.display().to_string()),
                metadata_path: Some(metadata_path.display().to_string()),
                width: w,
                height: h,
                capture_method: CaptureMethod::Element,
            };
        }

        if self.config.crop_fallback
            && self.try_crop_fallback(page, ad, &screenshot_path).await
        {
            return AdCapture {
                ad_index: index,
                screenshot_path: Some(screenshot_path.display().to_string()),
                metadata_path: Some(metadata_path.display().to_string()),
                width: w,
                height: h,
                capture_method: CaptureMethod::CropFallback,
            };
        }

        AdCapture {
            ad_index: index,
            screenshot_path: None,
            metadata_path: Some(metadata_path.display().to_string()),
            width: w,
            height: h,
            capture_method: CaptureMethod::Failed,
        }
    }

    fn write_metadata(
        &self,
        path: &Path,
        ad: &AdElement,
        domain: &str,
        consent_mode: &str,
        filename: &str,
    ) {
        let metadata = json!({
            "source_site": domain,
            "consent_mode": consent_mode,
            "ad_network": ad.ad_network,
            "element_tag": ad.tag_name,
            "element_id": ad.ad_id,
            "element_classes": ad.ad_class,
            "iframe_src": ad.iframe_src,
            "position": {"x": ad.x, "y": ad.y},
            "size": {"width": ad.width as u32, "height": ad.height as u32},
            "iab_format": ad.iab_size,
            "is_above_fold": ad.y < 1080.0,
            "captured_at": Utc::now().to_rfc3339(),
            "screenshot_file": format!("{filename}.png"),
        });
        if let Ok(text) = serde_json::to_string_pretty(&metadata) {
            let _ = std::fs::write(path, text);
        }
    }

    /// Match a non-main frame by URL substring overlap and screenshot its owner element.
    async fn try_frame_element_screenshot(&self, page: &Page, ad: &AdElement, path: &Path) -> bool {
        let Some(iframe_src) = ad.iframe_src.as_deref() else { return false };
        let Ok(main_frame) = page.main_frame().await else { return false };
        let Ok(frames) = page.frames().await else { return false };

        let src_prefix: String = iframe_src.chars().take(80).collect::<String>().to_lowercase();

        for frame in frames {
            if frame.is_detached() || frame.id() == main_frame.id() {
                continue;
            }
            let frame_url = frame.url();
            if frame_url.is_empty() {
                continue;
            }
            let frame_prefix: String = frame_url.chars().take(80).collect::<String>().to_lowercase();
            if !frame_prefix.contains(&src_prefix) && !src_prefix.contains(&frame_prefix) {
                continue;
            }

            let selector = format!("iframe[src=\"{frame_url}\"]");
            let locator = page.locator(selector);
            if locator.scroll_into_view_if_needed().await.is_err() {
                // Not fatal; the element may already be in view.
            }
            let _ = frame
                .wait_for_load_state_with_timeout(
                    viewpoint_core::DocumentLoadState::DomContentLoaded,
                    Duration::from_millis(2_000),
                )
                .await;
            tokio::time::sleep(Duration::from_millis(500)).await;

            let capture = locator.screenshot().path(path).capture().await;
            if capture.is_ok() {
                return true;
            }
        }
        false
    }

    async fn try_element_screenshot(&self, page: &Page, ad: &AdElement, path: &Path) -> bool {
        let locator = if let Some(id) = &ad.ad_id {
            page.locator(format!("#{id}")).first()
        } else if ad.is_iframe {
            if let Some(src) = &ad.iframe_src {
                let safe_src: String = src.chars().take(80).collect::<String>().replace('\'', "\\'");
                page.locator(format!("iframe[src*='{safe_src}']")).first()
            } else {
                page.locator(ad.selector.clone()).first()
            }
        } else {
            page.locator(ad.selector.clone()).first()
        };

        let _ = locator.scroll_into_view_if_needed().await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        locator.screenshot().path(path).capture().await.is_ok()
    }

    async fn try_crop_fallback(&self, page: &Page, ad: &AdElement, path: &Path) -> bool {
        let Ok(bytes) = page.screenshot().png().capture().await else { return false };
        let Ok(reader) = ImageReader::new(std::io::Cursor::new(bytes)).with_guessed_format()
        else {
            return false;
        };
        let Ok(img) = reader.decode() else { return false };

        let x1 = ad.x.max(0.0) as u32;
        let y1 = ad.y.max(0.0) as u32;
        let x2 = ((ad.x + ad.width) as u32).min(img.width());
        let y2 = ((ad.y + ad.height) as u32).min(img.height());
        if x2 <= x1 || y2 <= y1 {
            return false;
        }

        let cropped = img.crop_imm(x1, y1, x2 - x1, y2 - y1);
        cropped.save(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_unsafe_filename_characters() {
        assert_eq!(safe_filename("foo/bar:baz qux"), "foo_bar_baz_qux");
        assert_eq!(safe_filename("ok-name_1.2"), "ok-name_1.2");
    }

    #[test]
    fn disabled_config_is_represented() {
        let config = AdCaptureSettings {
            enabled: false,
            max_captures: 20,
            output_dir: "output/ad_captures/".to_string(),
            crop_fallback: true,
        };
        let capturer = AdCapturer::new(config);
        assert!(!capturer.config.enabled);
    }
}
