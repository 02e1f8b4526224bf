//! 터미널 출력 포맷팅 유틸리티
//!
//! 레지스트리 부트스트랩 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료/실패 상태 등을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║             Blasement League Registry            ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

fn boxed_title(title: &str) -> String {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let border = "═".repeat(50);
    format!("╔{}╗\n║{:^50}║\n╚{}╝", border, title, border)
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Resolving registry config
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// ```text
/// ✓ Step 3: Registry constructed (2 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 진행 단계 실패를 표시합니다
pub fn print_step_failed(step: u8, description: &str, reason: &str) {
    println!("✗ Step {}: {} - {}", step, description, reason);
}

/// 서브 작업의 상태를 표시합니다
///
/// ```text
///    ├─ ilb: https://api.example.com/ilb
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 부트스트랩 최종 요약을 출력합니다
///
/// `registry`가 `None`이면 라우트 없이 시작된 상태(degraded)로 표시합니다.
pub fn print_registry_summary(registry: Option<(&str, usize)>) {
    println!();
    match registry {
        Some((name, leagues)) => {
            print_boxed_title("🎉 LEAGUE REGISTRY MOUNTED");
            println!("   📦 Registry: {}", name);
            println!("   🏟️ Leagues: {}", leagues);
        }
        None => {
            print_boxed_title("⚠️ LEAGUE REGISTRY NOT MOUNTED");
            println!("   🚧 Serving framework routes only");
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_has_three_equal_width_lines() {
        let rendered = boxed_title("Blasement");
        let widths: Vec<usize> = rendered.lines().map(|l| l.chars().count()).collect();

        assert_eq!(widths, vec![52, 52, 52]);
        assert!(rendered.contains("Blasement"));
    }
}
