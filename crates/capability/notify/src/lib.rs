//! 报修通知能力：报修单生命周期事件的进程内广播。
//!
//! 报修单新建/确认时产出事件，任意数量的订阅方（日志任务、
//! 后续的推送通道）各自消费一份。发布是 fire-and-forget：没有
//! 订阅方或订阅方掉队不会阻塞报修主流程，只记一条日志。

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// 报修事件种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportEvent {
    /// 新报修单提交。
    Alert,
    /// 报修单被管理员确认。
    Confirmed,
}

/// 广播出去的报修通知。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNotice {
    pub event: ReportEvent,
    pub report_id: String,
    pub device_barcode: String,
    pub device_name: String,
    pub device_status: String,
}

/// 报修通知广播器。Clone 共享同一条通道。
#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<ReportNotice>,
}

impl Notifier {
    /// `capacity` 为每个订阅方的滞留上限，超出后最旧的事件被丢弃。
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 新报修单事件。
    pub fn emit_report_alert(&self, notice: ReportNotice) {
        self.emit(notice);
    }

    /// 报修单确认事件。
    pub fn emit_report_confirmed(&self, notice: ReportNotice) {
        self.emit(notice);
    }

    fn emit(&self, notice: ReportNotice) {
        // send 只在没有任何订阅方时失败，事件直接丢弃
        if self.sender.send(notice.clone()).is_err() {
            tracing::debug!(
                report_id = %notice.report_id,
                event = ?notice.event,
                "report notice dropped: no subscribers"
            );
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReportNotice> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(event: ReportEvent, report_id: &str) -> ReportNotice {
        ReportNotice {
            event,
            report_id: report_id.to_string(),
            device_barcode: "D1".to_string(),
            device_name: "Projector".to_string(),
            device_status: "not working".to_string(),
        }
    }

    #[tokio::test]
    async fn subscribers_each_receive_every_event() {
        let notifier = Notifier::new(8);
        let mut rx_a = notifier.subscribe();
        let mut rx_b = notifier.subscribe();

        notifier.emit_report_alert(notice(ReportEvent::Alert, "r1"));
        notifier.emit_report_confirmed(notice(ReportEvent::Confirmed, "r1"));

        for rx in [&mut rx_a, &mut rx_b] {
            let first = rx.recv().await.expect("alert");
            assert_eq!(first.event, ReportEvent::Alert);
            let second = rx.recv().await.expect("confirmed");
            assert_eq!(second.event, ReportEvent::Confirmed);
        }
    }

    #[tokio::test]
    async fn emit_without_subscribers_does_not_panic() {
        let notifier = Notifier::new(8);
        notifier.emit_report_alert(notice(ReportEvent::Alert, "r1"));

        // 之后的订阅方看不到历史事件
        let mut rx = notifier.subscribe();
        notifier.emit_report_confirmed(notice(ReportEvent::Confirmed, "r1"));
        let got = rx.recv().await.expect("recv");
        assert_eq!(got.event, ReportEvent::Confirmed);
    }
}
